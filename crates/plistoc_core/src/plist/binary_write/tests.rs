use super::{integer_width, push_integer};
use crate::plist::{BinaryReader, DecodeOptions, Date, Dictionary, Trailer, Value, from_binary, to_binary};

fn dict(entries: Vec<(&str, Value)>) -> Value {
	Value::Dictionary(entries.into_iter().collect())
}

fn hex(text: &str) -> Vec<u8> {
	text.split_whitespace()
		.map(|pair| u8::from_str_radix(pair, 16).expect("hex byte"))
		.collect()
}

#[test]
fn encodes_small_dictionary_byte_exact() {
	let value = dict(vec![("a", Value::from(1)), ("b", Value::from("x"))]);
	let bytes = to_binary(&value).expect("encode succeeds");

	let expected = hex(
		"62 70 6c 69 73 74 30 30 d2 01 02 03 04 51 61 51 62 10 01 51 78 08 0d 0f 11 13 \
		 00 00 00 00 00 00 01 01 00 00 00 00 00 00 00 05 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 15",
	);
	assert_eq!(bytes, expected);
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), value);
}

#[test]
fn nested_containers_assign_root_first() {
	let value = Value::Array(vec![
		Value::from(1),
		Value::Array(vec![Value::from(2), Value::from(3)]),
		dict(vec![("k", Value::Bool(true))]),
	]);
	let bytes = to_binary(&value).expect("encode succeeds");

	let expected = hex(
		"62 70 6c 69 73 74 30 30 a3 01 02 05 10 01 a2 03 04 10 02 10 03 d1 06 07 51 6b 09 \
		 08 0c 0e 11 13 15 18 1a 00 00 00 00 00 00 01 01 00 00 00 00 00 00 00 08 00 00 00 00 00 00 00 00 \
		 00 00 00 00 00 00 00 1b",
	);
	assert_eq!(bytes, expected);
}

#[test]
fn integer_widths_are_minimal_powers_of_two() {
	let cases: [(i64, usize); 10] = [
		(0, 1),
		(1, 1),
		(255, 1),
		(256, 2),
		(65_535, 2),
		(65_536, 4),
		(0xFF_FFFF, 4),
		(0x1_0000_0000, 8),
		(i64::MAX, 8),
		(-1, 8),
	];
	for (value, width) in cases {
		assert_eq!(integer_width(value), width, "width of {value}");

		let mut first = Vec::new();
		let mut second = Vec::new();
		push_integer(&mut first, value);
		push_integer(&mut second, value);
		assert_eq!(first, second, "encoding {value} is deterministic");
		assert_eq!(first.len(), 1 + width);
		assert_eq!(first[0], 0x10 | width.trailing_zeros() as u8);
	}
}

#[test]
fn integers_round_trip_across_widths() {
	let items: Vec<Value> = [0, 1, 127, 128, 255, 256, 40_000, 70_000, 3_000_000_000, i64::MAX, -1, -129, i64::MIN]
		.into_iter()
		.map(Value::Integer)
		.collect();
	let value = Value::Array(items);

	assert_eq!(from_binary(&to_binary(&value).expect("encode")).expect("decode"), value);
}

#[test]
fn long_counts_use_integer_suffix() {
	let text = "abcdefghijklmnopqrstuvwxyz";
	let bytes = to_binary(&Value::from(text)).expect("encode succeeds");

	assert_eq!(&bytes[8..11], &[0x5F, 0x10, 26]);
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), Value::from(text));
}

#[test]
fn large_array_uses_two_byte_references() {
	let value = Value::Array((0..300).map(Value::Integer).collect());
	let bytes = to_binary(&value).expect("encode succeeds");
	let opt = DecodeOptions::default();
	let reader = BinaryReader::new(&bytes, &opt).expect("reader opens");

	assert_eq!(reader.trailer().object_count, 301);
	assert_eq!(reader.trailer().ref_size, 2);
	assert_eq!(reader.read_root().expect("decode succeeds"), value);
}

#[test]
fn non_ascii_strings_use_utf16() {
	let value = Value::from("caf\u{e9} \u{1F600}");
	let bytes = to_binary(&value).expect("encode succeeds");

	assert_eq!(bytes[8], 0x67);
	assert_eq!(&bytes[9..11], &[0x00, b'c']);
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), value);
}

#[test]
fn reals_pick_narrowest_lossless_width() {
	let narrow = to_binary(&Value::Real(1.5)).expect("encode succeeds");
	assert_eq!(narrow[8], 0x22);
	assert_eq!(&narrow[9..13], &1.5_f32.to_be_bytes());

	let wide = to_binary(&Value::Real(0.1)).expect("encode succeeds");
	assert_eq!(wide[8], 0x23);
	assert_eq!(from_binary(&wide).expect("decode succeeds"), Value::Real(0.1));
}

#[test]
fn apple_epoch_date_encodes_as_zero() {
	let date = Date::parse_iso8601("2001-01-01T00:00:00Z").expect("date parses");
	let bytes = to_binary(&Value::Date(date)).expect("encode succeeds");

	assert_eq!(bytes[8], 0x33);
	assert_eq!(&bytes[9..17], &0.0_f64.to_be_bytes());
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), Value::Date(Date::EPOCH));
}

#[test]
fn trailer_matches_offset_table() {
	let mut prefs = Dictionary::new();
	for idx in 0..40 {
		prefs.insert(format!("key{idx}"), Value::from(format!("value number {idx}")));
	}
	let bytes = to_binary(&Value::Dictionary(prefs)).expect("encode succeeds");
	let trailer = Trailer::parse(&bytes).expect("trailer parses");
	let opt = DecodeOptions::default();
	let reader = BinaryReader::new(&bytes, &opt).expect("reader opens");

	assert_eq!(trailer.object_count, 81);
	assert_eq!(reader.offsets().len(), trailer.object_count);
	assert_eq!(
		bytes.len() - 32 - trailer.offset_table_offset,
		trailer.object_count * trailer.offset_size
	);

	let largest = *reader.offsets().iter().max().expect("offsets exist");
	assert!(largest > 0xFF, "fixture should need two-byte offsets");
	assert_eq!(trailer.offset_size, 2);
	for index in 0..trailer.object_count {
		for child in reader.child_refs(index).expect("refs resolve") {
			assert!(reader.offsets()[child] < trailer.offset_table_offset);
		}
	}
}

#[test]
fn empty_containers_and_singletons() {
	let value = dict(vec![
		("empty_array", Value::Array(Vec::new())),
		("empty_dict", Value::Dictionary(Dictionary::new())),
		("empty_data", Value::Data(Vec::new())),
		("empty_string", Value::from("")),
		("null", Value::Null),
		("no", Value::Bool(false)),
	]);

	assert_eq!(from_binary(&to_binary(&value).expect("encode")).expect("decode"), value);
}

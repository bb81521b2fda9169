use crate::plist::{DecodeOptions, PlistError, Trailer, Value, decode_binary, from_binary};

/// Assemble a document from raw object encodings with 1-byte refs and offsets.
fn document(objects: &[&[u8]], top_object: u64) -> Vec<u8> {
	let mut out = b"bplist00".to_vec();
	let mut offsets = Vec::new();
	for object in objects {
		offsets.push(out.len() as u8);
		out.extend_from_slice(object);
	}
	let offset_table_offset = out.len();
	out.extend_from_slice(&offsets);
	Trailer {
		offset_size: 1,
		ref_size: 1,
		object_count: objects.len(),
		top_object,
		offset_table_offset,
	}
	.write(&mut out);
	out
}

#[test]
fn decodes_scalars() {
	let bytes = document(
		&[
			&[0xA7, 1, 2, 3, 4, 5, 6, 7],
			&[0x00],
			&[0x09],
			&[0x11, 0x01, 0x00],
			&[0x22, 0x3F, 0xC0, 0x00, 0x00],
			&[0x43, 1, 2, 3],
			&[0x52, b'h', b'i'],
			&[0x62, 0x00, b'o', 0x00, b'k'],
		],
		0,
	);

	let value = from_binary(&bytes).expect("decode succeeds");
	assert_eq!(
		value,
		Value::Array(vec![
			Value::Null,
			Value::Bool(true),
			Value::Integer(256),
			Value::Real(1.5),
			Value::Data(vec![1, 2, 3]),
			Value::from("hi"),
			Value::from("ok"),
		])
	);
}

#[test]
fn small_widths_are_unsigned() {
	let bytes = document(&[&[0x10, 0xFF]], 0);
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), Value::Integer(255));

	let bytes = document(&[&[0x13, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]], 0);
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), Value::Integer(-2));
}

#[test]
fn sixteen_byte_integers_must_fit() {
	let mut small = vec![0x14];
	small.extend_from_slice(&7_i128.to_be_bytes());
	assert_eq!(from_binary(&document(&[&small], 0)).expect("fits"), Value::Integer(7));

	let mut huge = vec![0x14];
	huge.extend_from_slice(&(i128::from(i64::MAX) + 1).to_be_bytes());
	let err = from_binary(&document(&[&huge], 0)).expect_err("does not fit");
	assert!(matches!(err, PlistError::IntegerOverflow { .. }));
}

#[test]
fn duplicate_binary_keys_keep_last_value() {
	let bytes = document(&[&[0xD2, 1, 1, 2, 3], &[0x51, b'k'], &[0x10, 1], &[0x10, 2]], 0);
	let value = from_binary(&bytes).expect("decode succeeds");
	let dict = value.as_dictionary().expect("dictionary root");

	assert_eq!(dict.len(), 1);
	assert_eq!(dict.get("k"), Some(&Value::Integer(2)));
}

#[test]
fn rejects_non_string_keys() {
	let bytes = document(&[&[0xD1, 1, 1], &[0x10, 1]], 0);
	let err = from_binary(&bytes).expect_err("integer key should fail");
	assert!(matches!(err, PlistError::NonStringKey { index: 1, kind: "integer" }));
}

#[test]
fn rejects_reference_past_object_count() {
	let bytes = document(&[&[0xA1, 9]], 0);
	let err = from_binary(&bytes).expect_err("dangling reference should fail");
	assert!(matches!(err, PlistError::ReferenceOutOfRange { index: 9, count: 1 }));
}

#[test]
fn rejects_offset_outside_object_table() {
	let mut bytes = document(&[&[0x00]], 0);
	let table = Trailer::parse(&bytes).expect("trailer parses").offset_table_offset;
	bytes[table] = 0x40;
	let err = from_binary(&bytes).expect_err("bad offset should fail");
	assert!(matches!(err, PlistError::OffsetOutOfRange { index: 0, offset: 0x40, .. }));
}

#[test]
fn rejects_unknown_marker() {
	let bytes = document(&[&[0x80, 0x01]], 0);
	let err = from_binary(&bytes).expect_err("uid marker unsupported");
	assert!(matches!(err, PlistError::UnsupportedObject { marker: 0x80, at: 8 }));
}

#[test]
fn rejects_truncated_payload() {
	let bytes = document(&[&[0x45, 1, 2]], 0);
	let err = from_binary(&bytes).expect_err("data runs past object table");
	assert!(matches!(err, PlistError::UnexpectedEof { .. }));
}

#[test]
fn rejects_unpaired_surrogate() {
	let bytes = document(&[&[0x61, 0xD8, 0x00]], 0);
	let err = from_binary(&bytes).expect_err("lone surrogate should fail");
	assert!(matches!(err, PlistError::InvalidUtf16 { at: 8 }));
}

#[test]
fn cyclic_references_hit_depth_limit() {
	let bytes = document(&[&[0xA1, 0]], 0);
	let opt = DecodeOptions {
		max_depth: 8,
		..DecodeOptions::default()
	};
	let err = decode_binary(&bytes, &opt).expect_err("self reference should stop");
	assert!(matches!(err, PlistError::DecodeDepthExceeded { max_depth: 8 }));
}

#[test]
fn object_count_limit_is_enforced() {
	let bytes = document(&[&[0xA2, 1, 2], &[0x00], &[0x00]], 0);
	let opt = DecodeOptions {
		max_object_count: 2,
		..DecodeOptions::default()
	};
	let err = decode_binary(&bytes, &opt).expect_err("too many objects");
	assert!(matches!(err, PlistError::TooManyObjects { count: 3, max: 2 }));
}

#[test]
fn root_is_reference_zero_regardless_of_top_object() {
	let bytes = document(&[&[0x51, b'a'], &[0x51, b'b']], 1);
	assert_eq!(Trailer::parse(&bytes).expect("trailer parses").top_object, 1);
	assert_eq!(from_binary(&bytes).expect("decode succeeds"), Value::from("a"));
}

use crate::plist::{Date, Dictionary, PlistError, Value, XmlWriteOptions, from_xml_str, to_xml_string, to_xml_string_with};

fn sample() -> Value {
	let mut nested = Dictionary::new();
	nested.insert("inner", Value::from(vec![Value::from(1), Value::from("two")]));

	let mut dict = Dictionary::new();
	dict.insert("zeta", Value::from("last-inserted-first"));
	dict.insert("count", Value::from(42));
	dict.insert("ratio", Value::from(0.1));
	dict.insert("whole", Value::Real(3.0));
	dict.insert("enabled", Value::Bool(true));
	dict.insert("disabled", Value::Bool(false));
	dict.insert("missing", Value::Null);
	dict.insert("when", Value::Date(Date::from_apple_seconds(86_400.0)));
	dict.insert("blob", Value::Data(vec![0xDE, 0xAD, 0xBE, 0xEF]));
	dict.insert("markup", Value::from("<a & b>"));
	dict.insert("nested", Value::Dictionary(nested));
	Value::Dictionary(dict)
}

#[test]
fn document_has_declaration_doctype_and_root() {
	let text = to_xml_string(&Value::from(1)).expect("encode succeeds");

	assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"), "got {text}");
	assert!(text.contains(
		"<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">"
	));
	assert!(text.contains("<plist version=\"1.0\">"));
	assert!(text.contains("<integer>1</integer>"));
	assert!(text.trim_end().ends_with("</plist>"));
	assert!(!text.starts_with('\u{feff}'), "no byte-order mark");
}

#[test]
fn scalars_use_plist_vocabulary() {
	let text = to_xml_string(&sample()).expect("encode succeeds");

	assert!(text.contains("<true/>"));
	assert!(text.contains("<false/>"));
	assert!(text.contains("<null/>"));
	assert!(text.contains("<real>0.1</real>"));
	assert!(text.contains("<real>3</real>"));
	assert!(text.contains("<date>2001-01-02T00:00:00Z</date>"));
	assert!(text.contains("<data>3q2+7w==</data>"));
	assert!(text.contains("<string>&lt;a &amp; b&gt;</string>"));
}

#[test]
fn output_is_indented() {
	let text = to_xml_string(&sample()).expect("encode succeeds");
	assert!(text.contains("\n\t\t<key>count</key>"), "got {text}");

	let spaced = to_xml_string_with(&sample(), &XmlWriteOptions { indent: "  ".to_owned() }).expect("encode succeeds");
	assert!(spaced.contains("\n    <key>count</key>"), "got {spaced}");
}

#[test]
fn round_trip_preserves_values_and_key_order() {
	let value = sample();
	let text = to_xml_string(&value).expect("encode succeeds");
	let back = from_xml_str(&text).expect("decode succeeds");

	assert_eq!(back, value);
	let keys: Vec<_> = back.as_dictionary().expect("dictionary root").keys().map(str::to_owned).collect();
	assert_eq!(keys.first().map(String::as_str), Some("zeta"));
}

#[test]
fn extreme_numbers_round_trip() {
	let value = Value::Array(vec![
		Value::Integer(i64::MIN),
		Value::Integer(i64::MAX),
		Value::Real(f64::MAX),
		Value::Real(-f64::MIN_POSITIVE),
		Value::Real(1e-300),
	]);
	let text = to_xml_string(&value).expect("encode succeeds");
	assert_eq!(from_xml_str(&text).expect("decode succeeds"), value);
}

#[test]
fn unrepresentable_date_is_an_error() {
	let err = to_xml_string(&Value::Date(Date::from_apple_seconds(f64::NAN))).expect_err("nan date should fail");
	assert!(matches!(err, PlistError::DateOutOfRange { .. }));
}

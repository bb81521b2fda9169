use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::trace;
use xml::reader::{EventReader, ParserConfig, XmlEvent};

use crate::plist::{Date, DecodeOptions, Dictionary, PlistError, Result, Value};

/// Decode an XML property list held in a string with default limits.
pub fn from_xml_str(source: &str) -> Result<Value> {
	decode_xml(source, &DecodeOptions::default())
}

/// Decode an XML property list held in a string.
///
/// Only `max_depth` applies; element nesting below the value root counts
/// the same way container references do in binary input.
pub fn decode_xml(source: &str, opt: &DecodeOptions) -> Result<Value> {
	from_xml_reader(source.as_bytes(), opt)
}

/// Decode an XML property list from a byte stream.
pub(crate) fn from_xml_reader<R: Read>(reader: R, opt: &DecodeOptions) -> Result<Value> {
	let root = parse_tree(reader, opt.max_depth)?;
	if root.name != "plist" {
		return Err(PlistError::MissingPlistRoot { found: root.name });
	}
	let top = root.children.first().ok_or(PlistError::EmptyDocument)?;
	parse_value(top)
}

/// Element subtree with concatenated character data.
struct Element {
	name: String,
	text: String,
	children: Vec<Element>,
}

/// Build the element tree, refusing values nested deeper than `max_depth`.
///
/// The `<plist>` element sits at stack index 0, so an element pushed onto a
/// stack of length `n` is a value at depth `n - 1`.
fn parse_tree<R: Read>(reader: R, max_depth: u32) -> Result<Element> {
	let limit = usize::try_from(max_depth).unwrap_or(usize::MAX).saturating_add(1);
	let config = ParserConfig::new()
		.ignore_comments(true)
		.whitespace_to_characters(true)
		.cdata_to_characters(true)
		.coalesce_characters(true);

	let mut stack: Vec<Element> = Vec::new();
	for event in EventReader::new_with_config(reader, config) {
		match event? {
			XmlEvent::StartElement { name, .. } => {
				if stack.len() > limit {
					return Err(PlistError::DecodeDepthExceeded { max_depth });
				}
				stack.push(Element {
					name: name.local_name,
					text: String::new(),
					children: Vec::new(),
				});
			}
			XmlEvent::EndElement { .. } => {
				let done = stack.pop().ok_or(PlistError::EmptyDocument)?;
				match stack.last_mut() {
					Some(parent) => parent.children.push(done),
					None => return Ok(done),
				}
			}
			XmlEvent::Characters(text) => {
				if let Some(open) = stack.last_mut() {
					open.text.push_str(&text);
				}
			}
			_ => {}
		}
	}

	Err(PlistError::EmptyDocument)
}

fn parse_value(element: &Element) -> Result<Value> {
	trace!("xml node <{}>", element.name);
	let value = match element.name.as_str() {
		"dict" => Value::Dictionary(parse_dict(element)?),
		"array" => Value::Array(element.children.iter().map(parse_value).collect::<Result<_>>()?),
		"string" => Value::String(element.text.clone()),
		"integer" => Value::Integer(parse_integer(&element.text)?),
		"real" => {
			let text = element.text.trim();
			Value::Real(text.parse().map_err(|_| PlistError::InvalidReal { text: text.to_owned() })?)
		}
		"true" => Value::Bool(true),
		"false" => Value::Bool(false),
		"null" => Value::Null,
		"date" => Value::Date(Date::parse_iso8601(&element.text)?),
		"data" => {
			let compact: String = element.text.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
			Value::Data(STANDARD.decode(compact)?)
		}
		other => return Err(PlistError::UnsupportedNode { name: other.to_owned() }),
	};
	Ok(value)
}

fn parse_dict(element: &Element) -> Result<Dictionary> {
	let children = &element.children;
	if children.len() % 2 != 0 {
		return Err(PlistError::OddDictionaryChildren { count: children.len() });
	}

	let mut dict = Dictionary::new();
	for pair in children.chunks_exact(2) {
		let (key, value) = (&pair[0], &pair[1]);
		if key.name != "key" {
			return Err(PlistError::ExpectedKey { found: key.name.clone() });
		}
		dict.try_insert(key.text.as_str(), parse_value(value)?)?;
	}
	Ok(dict)
}

/// Parse a base-10 integer; a `0x` prefix selects hexadecimal.
fn parse_integer(text: &str) -> Result<i64> {
	let trimmed = text.trim();
	let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
		Some(hex) => i64::from_str_radix(hex, 16),
		None => trimmed.parse::<i64>(),
	};
	parsed.map_err(|_| PlistError::InvalidInteger { text: trimmed.to_owned() })
}

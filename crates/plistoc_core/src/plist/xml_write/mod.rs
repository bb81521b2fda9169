use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

use crate::plist::{PlistError, Result, Value};

const DOCTYPE: &str = "\n<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">";

/// Formatting switches for XML output.
#[derive(Debug, Clone)]
pub struct XmlWriteOptions {
	/// String repeated once per nesting level.
	pub indent: String,
}

impl Default for XmlWriteOptions {
	fn default() -> Self {
		Self { indent: "\t".to_owned() }
	}
}

/// Encode a value as an XML property list document.
pub fn to_xml_string(value: &Value) -> Result<String> {
	to_xml_string_with(value, &XmlWriteOptions::default())
}

/// Encode a value as an XML property list document with explicit formatting.
pub fn to_xml_string_with(value: &Value, opt: &XmlWriteOptions) -> Result<String> {
	let mut buf = Vec::new();
	write_xml_with(value, &mut buf, opt)?;
	Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Stream an XML property list document into `sink`.
pub(crate) fn write_xml_with<W: Write>(value: &Value, sink: W, opt: &XmlWriteOptions) -> Result<()> {
	let mut writer = EmitterConfig::new()
		.perform_indent(true)
		.indent_string(opt.indent.clone())
		.pad_self_closing(false)
		.create_writer(sink);

	writer.write(XmlEvent::StartDocument {
		version: XmlVersion::Version10,
		encoding: Some("UTF-8"),
		standalone: None,
	})?;
	writer.inner_mut().write_all(DOCTYPE.as_bytes())?;
	writer.write(XmlEvent::start_element("plist").attr("version", "1.0"))?;
	compose(&mut writer, value)?;
	writer.write(XmlEvent::end_element())?;
	writer.inner_mut().write_all(b"\n")?;
	writer.inner_mut().flush()?;
	Ok(())
}

fn compose<W: Write>(writer: &mut EventWriter<W>, value: &Value) -> Result<()> {
	match value {
		Value::Null => empty_element(writer, "null"),
		Value::Bool(true) => empty_element(writer, "true"),
		Value::Bool(false) => empty_element(writer, "false"),
		Value::Integer(number) => text_element(writer, "integer", &number.to_string()),
		Value::Real(number) => text_element(writer, "real", &number.to_string()),
		Value::Date(date) => {
			let text = date.to_iso8601().ok_or(PlistError::DateOutOfRange {
				seconds: date.apple_seconds(),
			})?;
			text_element(writer, "date", &text)
		}
		Value::Data(bytes) => text_element(writer, "data", &STANDARD.encode(bytes)),
		Value::String(text) => text_element(writer, "string", text),
		Value::Array(items) => {
			writer.write(XmlEvent::start_element("array"))?;
			for item in items {
				compose(writer, item)?;
			}
			writer.write(XmlEvent::end_element())?;
			Ok(())
		}
		Value::Dictionary(dict) => {
			writer.write(XmlEvent::start_element("dict"))?;
			for (key, item) in dict.iter() {
				text_element(writer, "key", key)?;
				compose(writer, item)?;
			}
			writer.write(XmlEvent::end_element())?;
			Ok(())
		}
	}
}

fn empty_element<W: Write>(writer: &mut EventWriter<W>, name: &str) -> Result<()> {
	writer.write(XmlEvent::start_element(name))?;
	writer.write(XmlEvent::end_element())?;
	Ok(())
}

fn text_element<W: Write>(writer: &mut EventWriter<W>, name: &str, text: &str) -> Result<()> {
	writer.write(XmlEvent::start_element(name))?;
	if !text.is_empty() {
		writer.write(XmlEvent::characters(text))?;
	}
	writer.write(XmlEvent::end_element())?;
	Ok(())
}

#[cfg(test)]
mod tests;

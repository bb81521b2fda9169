use std::fs;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::plist::trailer::first8;
use crate::plist::xml_read::from_xml_reader;
use crate::plist::xml_write::write_xml_with;
use crate::plist::{DecodeOptions, Format, PlistError, Result, Value, XmlWriteOptions, from_binary, sniff, sniff_bytes, to_binary};

/// How a reader should pick the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFormat {
	/// Sniff the `bplist00` magic, otherwise try XML.
	#[default]
	Auto,
	/// Force the binary decoder.
	Binary,
	/// Force the XML decoder.
	Xml,
}

/// Decode a property list from a seekable stream.
///
/// The stream is rewound to its start in every mode, so a partially consumed
/// reader still decodes the whole document.
///
/// In [`ReadFormat::Auto`] mode a stream without the binary magic that also
/// fails to parse as XML is reported as [`PlistError::UnrecognizedFormat`].
pub fn read_plist<R: Read + Seek>(mut reader: R, format: ReadFormat) -> Result<Value> {
	let detected = match format {
		ReadFormat::Auto => sniff(&mut reader)?,
		ReadFormat::Binary => Format::Binary,
		ReadFormat::Xml => Format::Xml,
	};

	reader.seek(SeekFrom::Start(0))?;
	let mut bytes = Vec::new();
	reader.read_to_end(&mut bytes)?;
	debug!("reading {} bytes as {} ({format:?})", bytes.len(), detected.as_str());
	decode_as(&bytes, detected, format == ReadFormat::Auto)
}

/// Decode an in-memory property list, auto-detecting the format.
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
	decode_as(bytes, sniff_bytes(bytes), true)
}

/// Read and decode a property list file, auto-detecting the format.
pub fn open(path: impl AsRef<Path>) -> Result<Value> {
	let bytes = fs::read(path)?;
	from_bytes(&bytes)
}

/// Stream `value` as an XML document into `sink`.
pub fn write_xml(value: &Value, sink: impl Write) -> Result<()> {
	write_xml_with(value, sink, &XmlWriteOptions::default())
}

/// Encode `value` as `bplist00` into `sink`.
pub fn write_binary(value: &Value, mut sink: impl Write) -> Result<()> {
	let bytes = to_binary(value)?;
	sink.write_all(&bytes)?;
	sink.flush()?;
	Ok(())
}

/// Write `value` as an XML document at `path`, replacing any existing file.
pub fn write_xml_file(value: &Value, path: impl AsRef<Path>) -> Result<()> {
	let file = fs::File::create(path)?;
	write_xml(value, BufWriter::new(file))
}

/// Write `value` as `bplist00` at `path`, replacing any existing file.
pub fn write_binary_file(value: &Value, path: impl AsRef<Path>) -> Result<()> {
	let bytes = to_binary(value)?;
	fs::write(path, bytes)?;
	Ok(())
}

fn decode_as(bytes: &[u8], format: Format, sniffed: bool) -> Result<Value> {
	match format {
		Format::Binary => from_binary(bytes),
		Format::Xml if sniffed => from_xml_reader(bytes, &DecodeOptions::default()).map_err(|err| match err {
			PlistError::Xml(inner) => PlistError::UnrecognizedFormat {
				magic: first8(bytes),
				reason: inner.to_string(),
			},
			other => other,
		}),
		Format::Xml => from_xml_reader(bytes, &DecodeOptions::default()),
	}
}

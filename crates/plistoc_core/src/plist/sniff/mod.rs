use std::io::{Read, Seek, SeekFrom};

use serde::Serialize;

use crate::plist::{BINARY_MAGIC, Result};

const MAGIC: u64 = u64::from_be_bytes(*BINARY_MAGIC);

/// Serialized property list representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
	/// `bplist00` binary encoding.
	Binary,
	/// XML document encoding.
	Xml,
}

impl Format {
	/// Render format as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Binary => "binary",
			Self::Xml => "xml",
		}
	}
}

/// Classify a buffer by its first 8 bytes; anything but `bplist00` is XML.
pub fn sniff_bytes(bytes: &[u8]) -> Format {
	match bytes.first_chunk::<8>() {
		Some(head) if u64::from_be_bytes(*head) == MAGIC => Format::Binary,
		_ => Format::Xml,
	}
}

/// Classify a stream from its start, then rewind it to the start.
pub fn sniff<R: Read + Seek>(reader: &mut R) -> Result<Format> {
	reader.seek(SeekFrom::Start(0))?;
	let mut head = [0_u8; 8];
	let mut filled = 0;
	while filled < head.len() {
		let read = reader.read(&mut head[filled..])?;
		if read == 0 {
			break;
		}
		filled += read;
	}
	reader.seek(SeekFrom::Start(0))?;
	Ok(sniff_bytes(&head[..filled]))
}

use crate::plist::bytes::{be_uint, push_uint_be};
use crate::plist::{PlistError, Result};

/// `bplist00` file magic.
pub const BINARY_MAGIC: &[u8; 8] = b"bplist00";
/// Size of the magic header in bytes.
pub const HEADER_SIZE: usize = BINARY_MAGIC.len();
/// Size of the trailer in bytes.
pub const TRAILER_SIZE: usize = 32;

/// Parsed fixed-size trailer at the end of a binary plist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
	/// Width of each offset table entry in bytes.
	pub offset_size: usize,
	/// Width of each object reference in bytes.
	pub ref_size: usize,
	/// Number of objects (and offset table entries).
	pub object_count: usize,
	/// Root object reference as recorded by the writer.
	///
	/// Informational only: decoding always starts at reference 0.
	pub top_object: u64,
	/// Absolute byte offset of the offset table.
	pub offset_table_offset: usize,
}

impl Trailer {
	/// Parse and validate the trailer of a complete binary plist buffer.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		if !bytes.starts_with(BINARY_MAGIC) {
			return Err(PlistError::NotBinaryPlist { magic: first8(bytes) });
		}
		if bytes.len() < HEADER_SIZE + TRAILER_SIZE {
			return Err(PlistError::UnexpectedEof {
				at: bytes.len(),
				need: HEADER_SIZE + TRAILER_SIZE,
				rem: bytes.len(),
			});
		}

		let raw = &bytes[bytes.len() - TRAILER_SIZE..];
		let offset_size = usize::from(raw[6]);
		let ref_size = usize::from(raw[7]);
		let object_count = be_uint(&raw[12..16]) as usize;
		let top_object = be_uint(&raw[16..24]);
		let table_offset = be_uint(&raw[24..32]);

		if !(1..=8).contains(&offset_size) {
			return Err(PlistError::InvalidTrailer { reason: "offset entry width must be 1..=8" });
		}
		if !(1..=8).contains(&ref_size) {
			return Err(PlistError::InvalidTrailer { reason: "object reference width must be 1..=8" });
		}
		if object_count == 0 {
			return Err(PlistError::InvalidTrailer { reason: "object count is zero" });
		}

		let table_end = bytes.len() - TRAILER_SIZE;
		let offset_table_offset = usize::try_from(table_offset)
			.ok()
			.filter(|offset| (HEADER_SIZE..=table_end).contains(offset))
			.ok_or(PlistError::InvalidTrailer {
				reason: "offset table start outside buffer",
			})?;
		let table_len = object_count.checked_mul(offset_size).ok_or(PlistError::InvalidTrailer {
			reason: "offset table size overflows",
		})?;
		if table_len > table_end - offset_table_offset {
			return Err(PlistError::InvalidTrailer {
				reason: "offset table runs into trailer",
			});
		}

		Ok(Self {
			offset_size,
			ref_size,
			object_count,
			top_object,
			offset_table_offset,
		})
	}

	/// Append the 32-byte trailer encoding.
	pub fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&[0_u8; 6]);
		out.push(self.offset_size as u8);
		out.push(self.ref_size as u8);
		push_uint_be(out, self.object_count as u64, 8);
		push_uint_be(out, self.top_object, 8);
		push_uint_be(out, self.offset_table_offset as u64, 8);
	}
}

/// Copy up to the first 8 bytes, zero-padded.
pub(crate) fn first8(bytes: &[u8]) -> [u8; 8] {
	let mut magic = [0_u8; 8];
	let take = bytes.len().min(8);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

use log::{debug, trace, warn};

use crate::plist::bytes::{Cursor, be_uint};
use crate::plist::{Date, Dictionary, HEADER_SIZE, PlistError, Result, Trailer, Value};

/// Runtime limits for binary decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum container nesting depth; also stops reference cycles.
	pub max_depth: u32,
	/// Maximum object count accepted from the trailer.
	pub max_object_count: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 512,
			max_object_count: 1 << 24,
		}
	}
}

/// Decode a complete `bplist00` buffer with default limits.
pub fn from_binary(bytes: &[u8]) -> Result<Value> {
	decode_binary(bytes, &DecodeOptions::default())
}

/// Decode a complete `bplist00` buffer.
pub fn decode_binary(bytes: &[u8], opt: &DecodeOptions) -> Result<Value> {
	BinaryReader::new(bytes, opt)?.read_root()
}

/// Random-access view over one binary plist's object and offset tables.
pub struct BinaryReader<'a> {
	objects: &'a [u8],
	trailer: Trailer,
	offsets: Vec<usize>,
	opt: &'a DecodeOptions,
}

impl<'a> BinaryReader<'a> {
	/// Parse the trailer and offset table, validating every offset.
	pub fn new(bytes: &'a [u8], opt: &'a DecodeOptions) -> Result<Self> {
		let trailer = Trailer::parse(bytes)?;
		if trailer.object_count > opt.max_object_count {
			return Err(PlistError::TooManyObjects {
				count: trailer.object_count,
				max: opt.max_object_count,
			});
		}
		if trailer.top_object != 0 {
			warn!("trailer names top object {}, decoding from reference 0", trailer.top_object);
		}

		let objects = &bytes[..trailer.offset_table_offset];
		let mut cursor = Cursor::at(bytes, trailer.offset_table_offset);
		let mut offsets = Vec::with_capacity(trailer.object_count);
		for index in 0..trailer.object_count {
			let offset = cursor.read_uint_be(trailer.offset_size)?;
			let valid = usize::try_from(offset).ok().filter(|at| (HEADER_SIZE..objects.len()).contains(at));
			let Some(offset) = valid else {
				return Err(PlistError::OffsetOutOfRange {
					index,
					offset,
					end: objects.len(),
				});
			};
			offsets.push(offset);
		}

		debug!(
			"binary plist: {} objects, ref_size={}, offset_size={}, offset_table={}",
			trailer.object_count, trailer.ref_size, trailer.offset_size, trailer.offset_table_offset
		);

		Ok(Self {
			objects,
			trailer,
			offsets,
			opt,
		})
	}

	/// Parsed trailer.
	pub fn trailer(&self) -> Trailer {
		self.trailer
	}

	/// Absolute byte offset of each object, by reference index.
	pub fn offsets(&self) -> &[usize] {
		&self.offsets
	}

	/// Decode the root object, which is always reference 0.
	pub fn read_root(&self) -> Result<Value> {
		self.read_object(0, 0)
	}

	/// Reference indices held by the container at `index`; empty for scalars.
	pub fn child_refs(&self, index: usize) -> Result<Vec<usize>> {
		let mut cursor = self.cursor_for(index)?;
		let marker = cursor.read_u8()?;
		match marker >> 4 {
			0xA => {
				let count = read_count(&mut cursor, marker)?;
				self.read_refs(&mut cursor, count)
			}
			0xD => {
				let count = read_count(&mut cursor, marker)?;
				let count = count.checked_mul(2).ok_or(PlistError::IntegerOverflow { at: cursor.pos() })?;
				self.read_refs(&mut cursor, count)
			}
			_ => Ok(Vec::new()),
		}
	}

	fn cursor_for(&self, index: usize) -> Result<Cursor<'a>> {
		let offset = *self.offsets.get(index).ok_or(PlistError::ReferenceOutOfRange {
			index: index as u64,
			count: self.offsets.len(),
		})?;
		Ok(Cursor::at(self.objects, offset))
	}

	fn read_object(&self, index: usize, depth: u32) -> Result<Value> {
		if depth > self.opt.max_depth {
			return Err(PlistError::DecodeDepthExceeded { max_depth: self.opt.max_depth });
		}

		let mut cursor = self.cursor_for(index)?;
		let at = cursor.pos();
		let marker = cursor.read_u8()?;
		let info = marker & 0x0F;
		trace!("object {index} at {at}: marker 0x{marker:02x}");

		let value = match marker >> 4 {
			0x0 => match marker {
				0x00 => Value::Null,
				0x08 => Value::Bool(false),
				0x09 => Value::Bool(true),
				_ => return Err(PlistError::UnsupportedObject { marker, at }),
			},
			0x1 => Value::Integer(read_int_payload(&mut cursor, info, at)?),
			0x2 => match 1_usize << info.min(15) {
				4 => Value::Real(f64::from(cursor.read_f32_be()?)),
				8 => Value::Real(cursor.read_f64_be()?),
				width => return Err(PlistError::UnsupportedRealWidth { width, at }),
			},
			0x3 => {
				if info != 3 {
					return Err(PlistError::UnsupportedObject { marker, at });
				}
				Value::Date(Date::from_apple_seconds(cursor.read_f64_be()?))
			}
			0x4 => {
				let count = read_count(&mut cursor, marker)?;
				Value::Data(cursor.read_exact(count)?.to_vec())
			}
			0x5 => {
				let count = read_count(&mut cursor, marker)?;
				Value::String(cursor.read_exact(count)?.iter().map(|byte| char::from(*byte)).collect())
			}
			0x6 => {
				let count = read_count(&mut cursor, marker)?;
				let len = count.checked_mul(2).ok_or(PlistError::IntegerOverflow { at })?;
				let units: Vec<u16> = cursor
					.read_exact(len)?
					.chunks_exact(2)
					.map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
					.collect();
				Value::String(String::from_utf16(&units).map_err(|_| PlistError::InvalidUtf16 { at })?)
			}
			0xA => {
				let count = read_count(&mut cursor, marker)?;
				let refs = self.read_refs(&mut cursor, count)?;
				let mut items = Vec::with_capacity(refs.len());
				for child in refs {
					items.push(self.read_object(child, depth + 1)?);
				}
				Value::Array(items)
			}
			0xD => {
				let count = read_count(&mut cursor, marker)?;
				let keys = self.read_refs(&mut cursor, count)?;
				let values = self.read_refs(&mut cursor, count)?;
				let mut dict = Dictionary::new();
				for (key_ref, value_ref) in keys.into_iter().zip(values) {
					let key = match self.read_object(key_ref, depth + 1)? {
						Value::String(key) => key,
						other => {
							return Err(PlistError::NonStringKey {
								index: key_ref,
								kind: other.kind(),
							});
						}
					};
					let value = self.read_object(value_ref, depth + 1)?;
					if dict.insert(key.as_str(), value).is_some() {
						warn!("duplicate dictionary key {key:?} in object {index}, keeping last value");
					}
				}
				Value::Dictionary(dict)
			}
			_ => return Err(PlistError::UnsupportedObject { marker, at }),
		};

		Ok(value)
	}

	fn read_refs(&self, cursor: &mut Cursor<'a>, count: usize) -> Result<Vec<usize>> {
		let ref_size = self.trailer.ref_size;
		let len = count.checked_mul(ref_size).ok_or(PlistError::IntegerOverflow { at: cursor.pos() })?;
		let raw = cursor.read_exact(len)?;

		raw.chunks_exact(ref_size)
			.map(|chunk| {
				let index = be_uint(chunk);
				usize::try_from(index)
					.ok()
					.filter(|idx| *idx < self.offsets.len())
					.ok_or(PlistError::ReferenceOutOfRange {
						index,
						count: self.offsets.len(),
					})
			})
			.collect()
	}
}

/// Read an inline count, or the integer object following a `0xF` nibble.
fn read_count(cursor: &mut Cursor<'_>, marker: u8) -> Result<usize> {
	let info = marker & 0x0F;
	if info != 0x0F {
		return Ok(usize::from(info));
	}

	let at = cursor.pos();
	let int_marker = cursor.read_u8()?;
	if int_marker >> 4 != 0x1 {
		return Err(PlistError::UnsupportedObject { marker: int_marker, at });
	}
	let count = read_int_payload(cursor, int_marker & 0x0F, at)?;
	usize::try_from(count).map_err(|_| PlistError::IntegerOverflow { at })
}

/// Read an integer payload whose width is `2^info` bytes.
///
/// Widths below 8 bytes are unsigned, 8 bytes is signed, and 16-byte values
/// must fit in `i64`.
fn read_int_payload(cursor: &mut Cursor<'_>, info: u8, at: usize) -> Result<i64> {
	match info {
		0..=2 => Ok(cursor.read_uint_be(1 << info)? as i64),
		3 => cursor.read_i64_be(),
		4 => i64::try_from(cursor.read_i128_be()?).map_err(|_| PlistError::IntegerOverflow { at }),
		_ => Err(PlistError::UnsupportedIntegerWidth { width: 1 << info, at }),
	}
}

#[cfg(test)]
mod tests;

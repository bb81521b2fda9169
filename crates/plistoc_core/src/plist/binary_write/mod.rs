use log::debug;

use crate::plist::bytes::{min_byte_width, push_uint_be};
use crate::plist::{BINARY_MAGIC, Date, Result, Trailer, Value};

const TAG_INTEGER: u8 = 0x1;
const TAG_DATA: u8 = 0x4;
const TAG_ASCII: u8 = 0x5;
const TAG_UTF16: u8 = 0x6;
const TAG_ARRAY: u8 = 0xA;
const TAG_DICT: u8 = 0xD;
const INLINE_COUNT_MAX: usize = 14;

/// Encode a value as a complete `bplist00` buffer.
pub fn to_binary(value: &Value) -> Result<Vec<u8>> {
	Ok(ObjectArena::build(value).encode())
}

/// One flattened object; containers hold reference indices.
enum Slot<'v> {
	Null,
	Bool(bool),
	Integer(i64),
	Real(f64),
	Date(Date),
	Data(&'v [u8]),
	String(&'v str),
	Array(Vec<usize>),
	Dictionary { keys: Vec<usize>, values: Vec<usize> },
}

/// Per-call object table under construction, indexed by reference.
struct ObjectArena<'v> {
	slots: Vec<Option<Slot<'v>>>,
	next: usize,
}

impl<'v> ObjectArena<'v> {
	/// Count objects, then assign references top-down from the highest index.
	///
	/// Children are always assigned before their container, so the root ends
	/// up at reference 0.
	fn build(root: &'v Value) -> Self {
		let count = count_objects(root);
		let mut arena = Self {
			slots: (0..count).map(|_| None).collect(),
			next: count,
		};
		let root_ref = arena.flatten(root);
		debug_assert_eq!(root_ref, 0, "root must be reference 0");
		arena
	}

	fn assign(&mut self, slot: Slot<'v>) -> usize {
		self.next -= 1;
		self.slots[self.next] = Some(slot);
		self.next
	}

	fn flatten(&mut self, value: &'v Value) -> usize {
		let slot = match value {
			Value::Null => Slot::Null,
			Value::Bool(flag) => Slot::Bool(*flag),
			Value::Integer(number) => Slot::Integer(*number),
			Value::Real(number) => Slot::Real(*number),
			Value::Date(date) => Slot::Date(*date),
			Value::Data(bytes) => Slot::Data(bytes),
			Value::String(text) => Slot::String(text),
			Value::Array(items) => {
				let mut refs: Vec<usize> = items.iter().rev().map(|item| self.flatten(item)).collect();
				refs.reverse();
				Slot::Array(refs)
			}
			Value::Dictionary(dict) => {
				let mut values: Vec<usize> = dict.values().rev().map(|item| self.flatten(item)).collect();
				values.reverse();
				let mut keys: Vec<usize> = dict.keys().rev().map(|key| self.assign(Slot::String(key))).collect();
				keys.reverse();
				Slot::Dictionary { keys, values }
			}
		};
		self.assign(slot)
	}

	/// Serialize objects in ascending reference order, then offsets and trailer.
	fn encode(self) -> Vec<u8> {
		let object_count = self.slots.len();
		let ref_size = min_byte_width(object_count.saturating_sub(1) as u64);

		let mut out = BINARY_MAGIC.to_vec();
		let mut offsets = Vec::with_capacity(object_count);
		for slot in self.slots.iter().flatten() {
			offsets.push(out.len());
			write_object(&mut out, slot, ref_size);
		}

		let offset_table_offset = out.len();
		let max_offset = offsets.iter().copied().max().unwrap_or(0);
		let offset_size = min_byte_width(max_offset as u64);
		for offset in &offsets {
			push_uint_be(&mut out, *offset as u64, offset_size);
		}

		Trailer {
			offset_size,
			ref_size,
			object_count,
			top_object: 0,
			offset_table_offset,
		}
		.write(&mut out);

		debug!("encoded binary plist: {object_count} objects, ref_size={ref_size}, offset_size={offset_size}, {} bytes", out.len());
		out
	}
}

/// Number of object-table entries needed for `value`.
///
/// Dictionary keys are separate objects.
fn count_objects(value: &Value) -> usize {
	match value {
		Value::Array(items) => 1 + items.iter().map(count_objects).sum::<usize>(),
		Value::Dictionary(dict) => 1 + dict.len() + dict.values().map(count_objects).sum::<usize>(),
		_ => 1,
	}
}

fn write_object(out: &mut Vec<u8>, slot: &Slot<'_>, ref_size: usize) {
	match slot {
		Slot::Null => out.push(0x00),
		Slot::Bool(false) => out.push(0x08),
		Slot::Bool(true) => out.push(0x09),
		Slot::Integer(number) => push_integer(out, *number),
		Slot::Real(number) => {
			let narrow = *number as f32;
			if f64::from(narrow) == *number {
				out.push(0x22);
				out.extend_from_slice(&narrow.to_be_bytes());
			} else {
				out.push(0x23);
				out.extend_from_slice(&number.to_be_bytes());
			}
		}
		Slot::Date(date) => {
			out.push(0x33);
			out.extend_from_slice(&date.apple_seconds().to_be_bytes());
		}
		Slot::Data(bytes) => {
			push_header(out, TAG_DATA, bytes.len());
			out.extend_from_slice(bytes);
		}
		Slot::String(text) if text.is_ascii() => {
			push_header(out, TAG_ASCII, text.len());
			out.extend_from_slice(text.as_bytes());
		}
		Slot::String(text) => {
			let units: Vec<u16> = text.encode_utf16().collect();
			push_header(out, TAG_UTF16, units.len());
			for unit in units {
				out.extend_from_slice(&unit.to_be_bytes());
			}
		}
		Slot::Array(refs) => {
			push_header(out, TAG_ARRAY, refs.len());
			push_refs(out, refs, ref_size);
		}
		Slot::Dictionary { keys, values } => {
			push_header(out, TAG_DICT, keys.len());
			push_refs(out, keys, ref_size);
			push_refs(out, values, ref_size);
		}
	}
}

/// Marker byte with an inline count, or `0xF` plus an integer object.
fn push_header(out: &mut Vec<u8>, tag: u8, count: usize) {
	if count <= INLINE_COUNT_MAX {
		out.push((tag << 4) | count as u8);
	} else {
		out.push((tag << 4) | 0x0F);
		push_integer(out, count as i64);
	}
}

fn push_refs(out: &mut Vec<u8>, refs: &[usize], ref_size: usize) {
	for reference in refs {
		push_uint_be(out, *reference as u64, ref_size);
	}
}

/// Append an integer object using the minimal power-of-two width.
pub(crate) fn push_integer(out: &mut Vec<u8>, value: i64) {
	let width = integer_width(value);
	out.push((TAG_INTEGER << 4) | width.trailing_zeros() as u8);
	out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
}

/// Smallest width in {1, 2, 4, 8} holding `value`'s stripped big-endian bytes.
///
/// Negative values keep all leading `0xFF` bytes and always take 8.
pub(crate) fn integer_width(value: i64) -> usize {
	if value < 0 {
		return 8;
	}
	min_byte_width(value as u64).next_power_of_two()
}

#[cfg(test)]
mod tests;

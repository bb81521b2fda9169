use crate::plist::{PlistError, Result};

/// Bounded big-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at `pos`.
	pub fn at(bytes: &'a [u8], pos: usize) -> Self {
		Self { bytes, pos }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(PlistError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a big-endian unsigned integer of `width` bytes (1 to 8).
	pub fn read_uint_be(&mut self, width: usize) -> Result<u64> {
		let raw = self.read_exact(width)?;
		Ok(be_uint(raw))
	}

	/// Read a big-endian `f32`.
	pub fn read_f32_be(&mut self) -> Result<f32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(f32::from_be_bytes(buf))
	}

	/// Read a big-endian `f64`.
	pub fn read_f64_be(&mut self) -> Result<f64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(f64::from_be_bytes(buf))
	}

	/// Read a big-endian `i64`.
	pub fn read_i64_be(&mut self) -> Result<i64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(i64::from_be_bytes(buf))
	}

	/// Read a big-endian `i128`.
	pub fn read_i128_be(&mut self) -> Result<i128> {
		let raw = self.read_exact(16)?;
		let mut buf = [0_u8; 16];
		buf.copy_from_slice(raw);
		Ok(i128::from_be_bytes(buf))
	}
}

/// Fold up to 8 big-endian bytes into an unsigned integer.
pub fn be_uint(bytes: &[u8]) -> u64 {
	bytes.iter().fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// Minimal number of bytes (at least 1) needed to hold `value` unsigned.
pub fn min_byte_width(value: u64) -> usize {
	let bits = 64 - value.leading_zeros() as usize;
	bits.div_ceil(8).max(1)
}

/// Append the low `width` bytes of `value` in big-endian order.
pub fn push_uint_be(out: &mut Vec<u8>, value: u64, width: usize) {
	let raw = value.to_be_bytes();
	out.extend_from_slice(&raw[raw.len() - width..]);
}

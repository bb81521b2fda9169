use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use plistoc::plist::{ReadFormat, Result, Value, read_plist};
use serde::Serialize;

/// Command-line spelling of [`ReadFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
	/// Detect from the leading bytes.
	Auto,
	/// Force XML decoding.
	Xml,
	/// Force `bplist00` decoding.
	Binary,
}

impl From<FormatArg> for ReadFormat {
	fn from(value: FormatArg) -> Self {
		match value {
			FormatArg::Auto => Self::Auto,
			FormatArg::Xml => Self::Xml,
			FormatArg::Binary => Self::Binary,
		}
	}
}

/// Open and decode a property list file.
pub(crate) fn read_value(path: &Path, format: ReadFormat) -> Result<Value> {
	debug!("reading {} ({format:?})", path.display());
	let file = File::open(path)?;
	read_plist(BufReader::new(file), format)
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Render bytes as lowercase hex, truncated to `limit` bytes.
pub(crate) fn hex_preview(bytes: &[u8], limit: usize) -> String {
	let mut out: String = bytes.iter().take(limit).map(|byte| format!("{byte:02x}")).collect();
	if bytes.len() > limit {
		out.push_str("..");
	}
	out
}

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use plistoc::plist::{Format, ReadFormat, Result, Trailer, read_plist, sniff_bytes};
use serde::Serialize;

use crate::cmd::util::{emit_json, hex_preview};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct InfoJson {
	path: String,
	format: Format,
	bytes: usize,
	magic: String,
	root_kind: &'static str,
	trailer: Option<TrailerJson>,
}

#[derive(Serialize)]
struct TrailerJson {
	offset_size: usize,
	ref_size: usize,
	object_count: usize,
	top_object: u64,
	offset_table_offset: usize,
}

impl From<Trailer> for TrailerJson {
	fn from(trailer: Trailer) -> Self {
		Self {
			offset_size: trailer.offset_size,
			ref_size: trailer.ref_size,
			object_count: trailer.object_count,
			top_object: trailer.top_object,
			offset_table_offset: trailer.offset_table_offset,
		}
	}
}

/// Print detected format, size, root kind, and binary trailer fields.
pub fn run(args: Args, format: ReadFormat) -> Result<()> {
	let Args { path, json } = args;

	let bytes = fs::read(&path)?;
	let detected = match format {
		ReadFormat::Auto => sniff_bytes(&bytes),
		ReadFormat::Binary => Format::Binary,
		ReadFormat::Xml => Format::Xml,
	};
	let value = read_plist(Cursor::new(bytes.as_slice()), format)?;
	let trailer = match detected {
		Format::Binary => Some(Trailer::parse(&bytes)?),
		Format::Xml => None,
	};

	let payload = InfoJson {
		path: path.display().to_string(),
		format: detected,
		bytes: bytes.len(),
		magic: hex_preview(&bytes, 8),
		root_kind: value.kind(),
		trailer: trailer.map(TrailerJson::from),
	};

	if json {
		return emit_json(&payload);
	}

	println!("path: {}", payload.path);
	println!("format: {}", detected.as_str());
	println!("bytes: {}", payload.bytes);
	println!("magic: {}", payload.magic);
	println!("root_kind: {}", payload.root_kind);
	if let Some(trailer) = payload.trailer {
		println!("offset_size: {}", trailer.offset_size);
		println!("ref_size: {}", trailer.ref_size);
		println!("object_count: {}", trailer.object_count);
		println!("top_object: {}", trailer.top_object);
		println!("offset_table_offset: {}", trailer.offset_table_offset);
	}

	Ok(())
}

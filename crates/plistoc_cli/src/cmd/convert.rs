use std::fs;
use std::path::PathBuf;

use log::info;
use plistoc::plist::{Format, ReadFormat, Result, write_binary_file, write_xml_file};

use crate::cmd::util::read_value;

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum Target {
	Xml,
	Binary,
}

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long, value_enum)]
	pub to: Target,
	#[arg(long)]
	pub out: PathBuf,
}

/// Decode `path` and write it back out in the requested encoding.
pub fn run(args: Args, format: ReadFormat) -> Result<()> {
	let Args { path, to, out } = args;

	let value = read_value(&path, format)?;
	let written = match to {
		Target::Xml => {
			write_xml_file(&value, &out)?;
			Format::Xml
		}
		Target::Binary => {
			write_binary_file(&value, &out)?;
			Format::Binary
		}
	};

	let size = fs::metadata(&out)?.len();
	info!("converted {} to {}", path.display(), written.as_str());
	println!("wrote {} ({}, {size} bytes)", out.display(), written.as_str());
	Ok(())
}

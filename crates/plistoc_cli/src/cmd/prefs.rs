use std::path::PathBuf;

use plistoc::plist::{ReadFormat, Result, entries};

use crate::cmd::print::render_scalar;
use crate::cmd::util::{emit_json, read_value};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// List typed entries of a preference dictionary.
pub fn run(args: Args, format: ReadFormat) -> Result<()> {
	let Args { path, json } = args;

	let list = entries(&read_value(&path, format)?)?;
	if json {
		return emit_json(&list);
	}

	let width = list.iter().map(|entry| entry.key.len()).max().unwrap_or(0);
	for entry in &list {
		println!("{:<6} {:<width$} = {}", entry.kind.as_str(), entry.key, render_scalar(&entry.value));
	}
	println!("entries: {}", list.len());
	Ok(())
}

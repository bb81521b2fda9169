use std::path::PathBuf;

use plistoc::plist::{ReadFormat, Result, Value};

use crate::cmd::util::{emit_json, hex_preview, read_value};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long, default_value_t = PrintOptions::default().max_data_bytes)]
	pub max_data_bytes: usize,
}

/// Output limits for the value tree.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Spaces added per nesting level.
	pub indent: usize,
	/// Maximum number of data bytes shown as hex.
	pub max_data_bytes: usize,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			indent: 2,
			max_data_bytes: 16,
		}
	}
}

/// Print a decoded value as an indented tree or as JSON.
pub fn run(args: Args, format: ReadFormat) -> Result<()> {
	let Args { path, json, max_data_bytes } = args;

	let value = read_value(&path, format)?;
	if json {
		return emit_json(&value);
	}

	let opt = PrintOptions {
		max_data_bytes,
		..PrintOptions::default()
	};
	print!("{}", render_tree(&value, &opt));
	Ok(())
}

/// Render a value tree, one node per line.
pub fn render_tree(value: &Value, opt: &PrintOptions) -> String {
	let mut out = String::new();
	render_node(&mut out, None, value, 0, opt);
	out
}

/// Render a scalar (or a container summary) on one line.
pub fn render_scalar(value: &Value) -> String {
	render_inline(value, &PrintOptions::default())
}

fn render_node(out: &mut String, label: Option<&str>, value: &Value, depth: usize, opt: &PrintOptions) {
	let pad = " ".repeat(depth * opt.indent);
	let line = match label {
		Some(label) => format!("{pad}{label}: {}\n", render_inline(value, opt)),
		None => format!("{pad}{}\n", render_inline(value, opt)),
	};
	out.push_str(&line);

	match value {
		Value::Array(items) => {
			for (idx, item) in items.iter().enumerate() {
				render_node(out, Some(&format!("[{idx}]")), item, depth + 1, opt);
			}
		}
		Value::Dictionary(dict) => {
			for (key, item) in dict.iter() {
				render_node(out, Some(&format!("{key:?}")), item, depth + 1, opt);
			}
		}
		_ => {}
	}
}

fn render_inline(value: &Value, opt: &PrintOptions) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Bool(flag) => flag.to_string(),
		Value::Integer(number) => number.to_string(),
		Value::Real(number) => format!("{number:?}"),
		Value::Date(date) => match date.to_iso8601() {
			Some(text) => format!("date {text}"),
			None => format!("date {}s", date.apple_seconds()),
		},
		Value::Data(bytes) => format!("data[{}] {}", bytes.len(), hex_preview(bytes, opt.max_data_bytes)),
		Value::String(text) => format!("{text:?}"),
		Value::Array(items) => format!("array[{}]", items.len()),
		Value::Dictionary(dict) => format!("dict[{}]", dict.len()),
	}
}

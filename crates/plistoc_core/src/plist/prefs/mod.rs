use log::debug;
use serde::Serialize;

use crate::plist::{PlistError, Result, Value};

/// Scalar type a preference entry is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefKind {
	/// 32 or 64-bit integer preference.
	Int,
	/// Single-precision float preference.
	Float,
	/// Text preference.
	String,
}

impl PrefKind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
		}
	}
}

/// One typed entry of a preference dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefEntry {
	/// Dictionary key.
	pub key: String,
	/// Normalized value: floats are narrowed to single precision.
	pub value: Value,
	/// Inferred storage kind.
	pub kind: PrefKind,
}

/// Classify a value as a preference kind.
///
/// Text that parses as a finite float counts as [`PrefKind::Float`], which
/// means numeric-looking strings do not survive as strings.
pub fn classify(value: &Value) -> Option<PrefKind> {
	match value {
		Value::Integer(_) => Some(PrefKind::Int),
		Value::Real(_) => Some(PrefKind::Float),
		Value::String(text) if parse_float(text).is_some() => Some(PrefKind::Float),
		Value::String(_) => Some(PrefKind::String),
		_ => None,
	}
}

/// List the typed entries of a preference dictionary in key order.
///
/// Entries that are neither integers, reals, nor strings are skipped.
pub fn entries(root: &Value) -> Result<Vec<PrefEntry>> {
	let dict = root.as_dictionary().ok_or(PlistError::NotADictionary { kind: root.kind() })?;

	let mut out = Vec::with_capacity(dict.len());
	for (key, value) in dict.iter() {
		let Some(kind) = classify(value) else {
			debug!("skipping preference {key:?}: unsupported {}", value.kind());
			continue;
		};

		let value = match (kind, value) {
			(PrefKind::Float, Value::Real(number)) => Value::Real(narrow(*number)),
			(PrefKind::Float, Value::String(text)) => Value::Real(parse_float(text).map(narrow).unwrap_or_default()),
			_ => value.clone(),
		};
		out.push(PrefEntry {
			key: key.to_owned(),
			value,
			kind,
		});
	}
	Ok(out)
}

/// Infer a scalar from untyped text: integer, then float, then string.
pub fn infer_scalar(text: &str) -> Value {
	if let Ok(number) = text.trim().parse::<i64>() {
		return Value::Integer(number);
	}
	match parse_float(text) {
		Some(number) => Value::Real(number),
		None => Value::String(text.to_owned()),
	}
}

fn parse_float(text: &str) -> Option<f64> {
	text.trim().parse::<f64>().ok().filter(|number| number.is_finite())
}

fn narrow(number: f64) -> f64 {
	f64::from(number as f32)
}

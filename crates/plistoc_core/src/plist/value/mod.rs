use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::plist::{Date, PlistError, Result};

/// Generic property-list document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Integer(i64),
	/// Floating point scalar.
	Real(f64),
	/// Point in time relative to the Apple epoch.
	Date(Date),
	/// Opaque byte payload.
	Data(Vec<u8>),
	/// Text scalar.
	String(String),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// String-keyed map with preserved insertion order.
	Dictionary(Dictionary),
}

impl Value {
	/// Stable lowercase label for the variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Integer(_) => "integer",
			Self::Real(_) => "real",
			Self::Date(_) => "date",
			Self::Data(_) => "data",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Dictionary(_) => "dictionary",
		}
	}

	/// Return the boolean payload, if any.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Return the integer payload, if any.
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(value) => Some(*value),
			_ => None,
		}
	}

	/// Return the real payload, if any.
	pub fn as_real(&self) -> Option<f64> {
		match self {
			Self::Real(value) => Some(*value),
			_ => None,
		}
	}

	/// Return the date payload, if any.
	pub fn as_date(&self) -> Option<Date> {
		match self {
			Self::Date(value) => Some(*value),
			_ => None,
		}
	}

	/// Return the data payload, if any.
	pub fn as_data(&self) -> Option<&[u8]> {
		match self {
			Self::Data(value) => Some(value),
			_ => None,
		}
	}

	/// Return the string payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Return the array items, if any.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Return the dictionary, if any.
	pub fn as_dictionary(&self) -> Option<&Dictionary> {
		match self {
			Self::Dictionary(dict) => Some(dict),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Integer(i64::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Real(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Real(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::Data(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

impl From<Dictionary> for Value {
	fn from(value: Dictionary) -> Self {
		Self::Dictionary(value)
	}
}

impl From<Date> for Value {
	fn from(value: Date) -> Self {
		Self::Date(value)
	}
}

/// Insertion-ordered string map with unique keys.
///
/// Equality is order-sensitive: two dictionaries with the same entries in a
/// different order compare unequal.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
	entries: IndexMap<String, Value>,
}

impl Dictionary {
	/// Create an empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the dictionary has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Insert or replace a value, returning the replaced one.
	///
	/// A replaced key keeps its original position.
	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		self.entries.insert(key.into(), value)
	}

	/// Insert a new key, failing if it already exists.
	pub fn try_insert(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
		match self.entries.entry(key.into()) {
			Entry::Occupied(slot) => Err(PlistError::DuplicateKey { key: slot.key().clone() }),
			Entry::Vacant(slot) => {
				slot.insert(value);
				Ok(())
			}
		}
	}

	/// Remove a key, returning its value. Later entries shift up one position.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.shift_remove(key)
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Value)> + ExactSizeIterator {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Iterate keys in insertion order.
	pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
		self.entries.keys().map(String::as_str)
	}

	/// Iterate values in insertion order.
	pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
		self.entries.values()
	}
}

impl PartialEq for Dictionary {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl<K: Into<String>> FromIterator<(K, Value)> for Dictionary {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let mut dict = Self::new();
		for (key, value) in iter {
			dict.insert(key, value);
		}
		dict
	}
}

impl IntoIterator for Dictionary {
	type Item = (String, Value);
	type IntoIter = indexmap::map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Integer(value) => serializer.serialize_i64(*value),
			Self::Real(value) => serializer.serialize_f64(*value),
			Self::Date(value) => match value.to_iso8601() {
				Some(text) => serializer.serialize_str(&text),
				None => serializer.serialize_f64(value.apple_seconds()),
			},
			Self::Data(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
			Self::String(text) => serializer.serialize_str(text),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Dictionary(dict) => dict.serialize(serializer),
		}
	}
}

impl Serialize for Dictionary {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (key, value) in self.iter() {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

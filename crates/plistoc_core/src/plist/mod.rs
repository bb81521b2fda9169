mod binary_read;
mod binary_write;
mod bytes;
mod date;
mod error;
mod file;
mod prefs;
mod sniff;
mod trailer;
mod value;
mod xml_read;
mod xml_write;

/// Binary decoding entry points, limits, and the random-access reader.
pub use binary_read::{BinaryReader, DecodeOptions, decode_binary, from_binary};
/// Binary encoding entry point.
pub use binary_write::to_binary;
/// Apple-epoch timestamp type and epoch constant.
pub use date::{APPLE_EPOCH_UNIX, Date};
/// Error and result aliases.
pub use error::{PlistError, Result};
/// Stream, buffer, and file front door.
pub use file::{ReadFormat, from_bytes, open, read_plist, write_binary, write_binary_file, write_xml, write_xml_file};
/// Typed preference view over a decoded dictionary.
pub use prefs::{PrefEntry, PrefKind, classify, entries, infer_scalar};
/// Format detection.
pub use sniff::{Format, sniff, sniff_bytes};
/// Binary trailer layout and constants.
pub use trailer::{BINARY_MAGIC, HEADER_SIZE, TRAILER_SIZE, Trailer};
/// Document value types.
pub use value::{Dictionary, Value};
/// XML decoding entry points.
pub use xml_read::{decode_xml, from_xml_str};
/// XML encoding entry points and options.
pub use xml_write::{XmlWriteOptions, to_xml_string, to_xml_string_with};

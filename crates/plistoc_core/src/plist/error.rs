use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PlistError>;

/// Errors produced while decoding, encoding, and classifying property lists.
#[derive(Debug, Error)]
pub enum PlistError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// XML document is not well-formed.
	#[error("xml: {0}")]
	Xml(#[from] xml::reader::Error),
	/// XML emitter failure.
	#[error("xml write: {0}")]
	XmlWrite(#[from] xml::writer::Error),
	/// Auto-detection found neither the binary magic nor parseable XML.
	#[error("unrecognized plist format (leading bytes={magic:?}): {reason}")]
	UnrecognizedFormat {
		/// First up-to-8 bytes of the stream.
		magic: [u8; 8],
		/// Why the XML fallback rejected the input.
		reason: String,
	},
	/// Document root element is not `<plist>`.
	#[error("expected <plist> root element, got <{found}>")]
	MissingPlistRoot {
		/// Name of the actual root element.
		found: String,
	},
	/// `<plist>` root holds no value element.
	#[error("plist document has no value element")]
	EmptyDocument,
	/// `<dict>` has an odd number of child elements.
	#[error("dictionary elements must have an even number of child nodes (got {count})")]
	OddDictionaryChildren {
		/// Number of child elements seen.
		count: usize,
	},
	/// A `<dict>` key position holds something other than `<key>`.
	#[error("expected <key> in dictionary, got <{found}>")]
	ExpectedKey {
		/// Element name found at the key position.
		found: String,
	},
	/// A dictionary key appeared twice in one XML `<dict>`.
	#[error("duplicate dictionary key {key:?}")]
	DuplicateKey {
		/// Repeated key.
		key: String,
	},
	/// XML element name is not part of the plist vocabulary.
	#[error("plist node <{name}> is not supported")]
	UnsupportedNode {
		/// Offending element name.
		name: String,
	},
	/// `<integer>` text is not a base-10 integer.
	#[error("invalid integer literal {text:?}")]
	InvalidInteger {
		/// Element text.
		text: String,
	},
	/// `<real>` text is not a floating point literal.
	#[error("invalid real literal {text:?}")]
	InvalidReal {
		/// Element text.
		text: String,
	},
	/// `<date>` text is not an ISO-8601 UTC timestamp.
	#[error("invalid date literal {text:?}")]
	InvalidDate {
		/// Element text.
		text: String,
	},
	/// Date lies outside the representable calendar range.
	#[error("date out of range: {seconds} seconds from 2001-01-01")]
	DateOutOfRange {
		/// Seconds since the Apple epoch.
		seconds: f64,
	},
	/// `<data>` text is not valid base64.
	#[error("invalid base64 payload: {0}")]
	InvalidBase64(#[from] base64::DecodeError),
	/// Input does not start with the `bplist00` magic.
	#[error("not a binary plist (magic={magic:?})")]
	NotBinaryPlist {
		/// First up-to-8 bytes of the buffer.
		magic: [u8; 8],
	},
	/// Trailer fields are inconsistent with the buffer.
	#[error("invalid trailer: {reason}")]
	InvalidTrailer {
		/// Which trailer constraint failed.
		reason: &'static str,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Offset table entry points outside the object table.
	#[error("object {index} offset {offset} outside object table (end={end})")]
	OffsetOutOfRange {
		/// Reference index whose offset is invalid.
		index: usize,
		/// Stored byte offset.
		offset: u64,
		/// First byte past the object table.
		end: usize,
	},
	/// Container references an object index past the offset table.
	#[error("object reference {index} out of range (object count={count})")]
	ReferenceOutOfRange {
		/// Offending reference index.
		index: u64,
		/// Number of objects in the document.
		count: usize,
	},
	/// Object marker byte is not supported.
	#[error("unsupported object marker 0x{marker:02x} at offset {at}")]
	UnsupportedObject {
		/// Marker byte.
		marker: u8,
		/// Byte offset of the marker.
		at: usize,
	},
	/// Integer object width is not 1, 2, 4, 8, or 16 bytes.
	#[error("unsupported integer width {width} at offset {at}")]
	UnsupportedIntegerWidth {
		/// Declared byte width.
		width: usize,
		/// Byte offset of the marker.
		at: usize,
	},
	/// Real object width is not 4 or 8 bytes.
	#[error("unsupported real width {width} at offset {at}")]
	UnsupportedRealWidth {
		/// Declared byte width.
		width: usize,
		/// Byte offset of the marker.
		at: usize,
	},
	/// 128-bit integer does not fit in `i64`.
	#[error("integer at offset {at} does not fit in 64 bits")]
	IntegerOverflow {
		/// Byte offset of the marker.
		at: usize,
	},
	/// Binary dictionary key resolved to a non-string object.
	#[error("dictionary key at reference {index} is {kind}, expected string")]
	NonStringKey {
		/// Reference index of the key object.
		index: usize,
		/// Kind label of the decoded key.
		kind: &'static str,
	},
	/// UTF-16 string object holds unpaired surrogates.
	#[error("invalid utf-16 string at offset {at}")]
	InvalidUtf16 {
		/// Byte offset of the marker.
		at: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Trailer declares more objects than permitted.
	#[error("object count {count} exceeds limit {max}")]
	TooManyObjects {
		/// Declared object count.
		count: usize,
		/// Configured ceiling.
		max: usize,
	},
	/// Operation requires a dictionary root.
	#[error("expected dictionary root, got {kind}")]
	NotADictionary {
		/// Kind label of the actual root.
		kind: &'static str,
	},
}

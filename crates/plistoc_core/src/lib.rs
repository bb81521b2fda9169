//! Public library API for reading and writing property lists.

/// Value model, XML and `bplist00` codecs, format sniffing, and file helpers.
pub mod plist;

/// Re-encoding command.
pub mod convert;
/// File-level information command.
pub mod info;
/// Preference listing command.
pub mod prefs;
/// Value tree printing command.
pub mod print;
/// Shared CLI helpers.
pub mod util;

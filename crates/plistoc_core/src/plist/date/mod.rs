use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::plist::{PlistError, Result};

/// Unix timestamp of the Apple epoch, 2001-01-01T00:00:00Z.
pub const APPLE_EPOCH_UNIX: i64 = 978_307_200;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Timestamp stored as seconds since the Apple epoch.
///
/// This is the on-disk representation of binary plist dates, so values
/// survive a binary round-trip bit for bit. Calendar conversions go through
/// [`chrono`] and are limited to nanosecond precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Date {
	seconds: f64,
}

impl Date {
	/// The Apple epoch itself.
	pub const EPOCH: Self = Self { seconds: 0.0 };

	/// Build from seconds since the Apple epoch.
	pub fn from_apple_seconds(seconds: f64) -> Self {
		Self { seconds }
	}

	/// Seconds since the Apple epoch.
	pub fn apple_seconds(self) -> f64 {
		self.seconds
	}

	/// Build from seconds since the Unix epoch.
	pub fn from_unix_seconds(seconds: f64) -> Self {
		Self {
			seconds: seconds - APPLE_EPOCH_UNIX as f64,
		}
	}

	/// Seconds since the Unix epoch.
	pub fn unix_seconds(self) -> f64 {
		self.seconds + APPLE_EPOCH_UNIX as f64
	}

	/// Convert from a UTC calendar timestamp.
	pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
		let whole = (datetime.timestamp() - APPLE_EPOCH_UNIX) as f64;
		let frac = f64::from(datetime.timestamp_subsec_nanos()) / NANOS_PER_SECOND;
		Self { seconds: whole + frac }
	}

	/// Convert to a UTC calendar timestamp, `None` when out of range.
	pub fn to_datetime(self) -> Option<DateTime<Utc>> {
		if !self.seconds.is_finite() {
			return None;
		}

		let mut whole = self.seconds.floor();
		let mut nanos = ((self.seconds - whole) * NANOS_PER_SECOND).round();
		if nanos >= NANOS_PER_SECOND {
			whole += 1.0;
			nanos = 0.0;
		}
		if whole.abs() > (i64::MAX / 2) as f64 {
			return None;
		}

		DateTime::from_timestamp(whole as i64 + APPLE_EPOCH_UNIX, nanos as u32)
	}

	/// Parse an ISO-8601 timestamp; a missing offset is read as UTC.
	pub fn parse_iso8601(text: &str) -> Result<Self> {
		let text = text.trim();
		if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
			return Ok(Self::from_datetime(datetime.with_timezone(&Utc)));
		}

		NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
			.map(|naive| Self::from_datetime(naive.and_utc()))
			.map_err(|_| PlistError::InvalidDate { text: text.to_owned() })
	}

	/// Render as `YYYY-MM-DDTHH:MM:SSZ`, with fractional digits only when present.
	pub fn to_iso8601(self) -> Option<String> {
		self.to_datetime().map(|datetime| datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
	}
}

impl From<DateTime<Utc>> for Date {
	fn from(datetime: DateTime<Utc>) -> Self {
		Self::from_datetime(datetime)
	}
}

// Conditional Request Helpers
//
// HTTP-date formatting/parsing and entity ETags for If-Modified-Since,
// If-Unmodified-Since and If-Match scenarios.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// ETag scheme version emitted by the control plane
pub const ETAG_VERSION: u32 = 1;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Format a timestamp as an HTTP-date (`Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn format_http_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date header value
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// ETag for an entity last modified at `t`, quotes included
///
/// The tag is the version followed by the modification time in Unix
/// nanoseconds, base 36.
pub fn etag(t: DateTime<Utc>) -> String {
    let nanos = t.timestamp_nanos_opt().unwrap_or(i64::MAX);
    format!("\"v{}-{}\"", ETAG_VERSION, to_base36(nanos))
}

/// Recover the modification time from an ETag produced by [`etag`]
pub fn parse_etag(value: &str) -> Option<DateTime<Utc>> {
    let inner = value.trim().strip_prefix('"')?.strip_suffix('"')?;
    let rest = inner.strip_prefix(&format!("v{}-", ETAG_VERSION))?;
    let nanos = i64::from_str_radix(rest, 36).ok()?;
    Some(Utc.timestamp_nanos(nanos))
}

fn to_base36(value: i64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(BASE36[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if negative {
        digits.push(b'-');
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Wall-clock baselines captured once per test group
///
/// `current_time` sits a few seconds in the past so that fixtures created
/// during setup are newer than it; `tomorrow` is guaranteed to be newer than
/// anything the server holds. Scenarios assume the group finishes well within
/// the skew margin.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalBaseline {
    pub current_time: DateTime<Utc>,
    pub tomorrow: DateTime<Utc>,
}

impl ConditionalBaseline {
    /// Capture baselines relative to the current wall clock
    pub fn capture(skew_secs: u64) -> Self {
        Self::at(Utc::now(), skew_secs)
    }

    pub fn at(now: DateTime<Utc>, skew_secs: u64) -> Self {
        let skew = i64::try_from(skew_secs).unwrap_or(i64::MAX);
        Self {
            current_time: now - Duration::seconds(skew),
            tomorrow: now + Duration::days(1),
        }
    }

    /// `current_time` as an HTTP-date
    pub fn current_time_rfc(&self) -> String {
        format_http_date(self.current_time)
    }

    /// `tomorrow` as an HTTP-date
    pub fn tomorrow_rfc(&self) -> String {
        format_http_date(self.tomorrow)
    }

    /// An ETag that cannot match any entity modified during the run
    pub fn stale_etag(&self) -> String {
        etag(self.current_time)
    }
}

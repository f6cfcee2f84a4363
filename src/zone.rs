//! Time-zone database boundary
//!
//! Thin wrappers over the IANA database: identifier resolution, the known
//! identifier list for pickers, city-name derivation and GMT offsets.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};

/// Resolve an IANA identifier. `None` means the caller should fall back to
/// the local zone; resolution failure is never an error.
pub fn resolve(identifier: &str) -> Option<Tz> {
    identifier.parse().ok()
}

/// All identifiers the database knows, for pickers and listings.
pub fn known_identifiers() -> impl Iterator<Item = &'static str> {
    TZ_VARIANTS.iter().map(|tz| tz.name())
}

/// Offset from GMT in seconds for `zone` at `instant`.
pub fn seconds_from_gmt(zone: Tz, instant: DateTime<Utc>) -> i32 {
    zone.offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
}

/// Derive a display city name from a zone identifier.
///
/// "Asia/Shanghai" -> "Shanghai", "America/New_York" -> "New York".
/// Identifiers without a slash come back verbatim.
pub fn city_name(identifier: &str) -> String {
    match identifier.rsplit_once('/') {
        Some((_, city)) => city.replace('_', " "),
        None => identifier.to_string(),
    }
}

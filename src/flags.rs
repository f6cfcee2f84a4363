//! Flag glyph derivation
//!
//! Maps a full time-zone identifier to an ISO region code and renders the
//! code as a regional-indicator flag. Identifiers outside the table render
//! the globe glyph.

pub const GLOBE: &str = "🌍";

/// Region codes keyed by full zone identifier. Zones whose region is
/// ambiguous (UTC, Etc/*) are intentionally absent and fall back to the
/// globe.
const ZONE_REGIONS: &[(&str, &str)] = &[
    ("Africa/Cairo", "EG"),
    ("Africa/Casablanca", "MA"),
    ("Africa/Johannesburg", "ZA"),
    ("Africa/Lagos", "NG"),
    ("Africa/Nairobi", "KE"),
    ("America/Anchorage", "US"),
    ("America/Argentina/Buenos_Aires", "AR"),
    ("America/Bogota", "CO"),
    ("America/Chicago", "US"),
    ("America/Denver", "US"),
    ("America/Halifax", "CA"),
    ("America/Lima", "PE"),
    ("America/Los_Angeles", "US"),
    ("America/Mexico_City", "MX"),
    ("America/New_York", "US"),
    ("America/Phoenix", "US"),
    ("America/Santiago", "CL"),
    ("America/Sao_Paulo", "BR"),
    ("America/Toronto", "CA"),
    ("America/Vancouver", "CA"),
    ("Asia/Baghdad", "IQ"),
    ("Asia/Bangkok", "TH"),
    ("Asia/Dhaka", "BD"),
    ("Asia/Dubai", "AE"),
    ("Asia/Ho_Chi_Minh", "VN"),
    ("Asia/Hong_Kong", "HK"),
    ("Asia/Jakarta", "ID"),
    ("Asia/Jerusalem", "IL"),
    ("Asia/Karachi", "PK"),
    ("Asia/Kathmandu", "NP"),
    ("Asia/Kolkata", "IN"),
    ("Asia/Kuala_Lumpur", "MY"),
    ("Asia/Manila", "PH"),
    ("Asia/Riyadh", "SA"),
    ("Asia/Seoul", "KR"),
    ("Asia/Shanghai", "CN"),
    ("Asia/Singapore", "SG"),
    ("Asia/Taipei", "TW"),
    ("Asia/Tehran", "IR"),
    ("Asia/Tokyo", "JP"),
    ("Atlantic/Reykjavik", "IS"),
    ("Australia/Adelaide", "AU"),
    ("Australia/Brisbane", "AU"),
    ("Australia/Melbourne", "AU"),
    ("Australia/Perth", "AU"),
    ("Australia/Sydney", "AU"),
    ("Europe/Amsterdam", "NL"),
    ("Europe/Athens", "GR"),
    ("Europe/Berlin", "DE"),
    ("Europe/Brussels", "BE"),
    ("Europe/Budapest", "HU"),
    ("Europe/Copenhagen", "DK"),
    ("Europe/Dublin", "IE"),
    ("Europe/Helsinki", "FI"),
    ("Europe/Istanbul", "TR"),
    ("Europe/Kyiv", "UA"),
    ("Europe/Lisbon", "PT"),
    ("Europe/London", "GB"),
    ("Europe/Madrid", "ES"),
    ("Europe/Moscow", "RU"),
    ("Europe/Oslo", "NO"),
    ("Europe/Paris", "FR"),
    ("Europe/Prague", "CZ"),
    ("Europe/Rome", "IT"),
    ("Europe/Stockholm", "SE"),
    ("Europe/Vienna", "AT"),
    ("Europe/Warsaw", "PL"),
    ("Europe/Zurich", "CH"),
    ("Pacific/Auckland", "NZ"),
    ("Pacific/Fiji", "FJ"),
    ("Pacific/Honolulu", "US"),
];

/// Region code for a full zone identifier, if known.
pub fn region_for_identifier(identifier: &str) -> Option<&'static str> {
    ZONE_REGIONS
        .iter()
        .find(|(zone, _)| *zone == identifier)
        .map(|(_, region)| *region)
}

/// Flag glyph for a full zone identifier. Unknown zones get the globe.
pub fn flag_for_identifier(identifier: &str) -> String {
    match region_for_identifier(identifier) {
        Some(region) => region_to_flag(region),
        None => GLOBE.to_string(),
    }
}

/// Render a two-letter region code as regional-indicator symbols.
fn region_to_flag(region: &str) -> String {
    // U+1F1E6 (REGIONAL INDICATOR A) - 'A' = 127397
    const BASE: u32 = 127_397;
    region
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .filter_map(|c| char::from_u32(BASE + c as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_zone_renders_flag() {
        assert_eq!(flag_for_identifier("Asia/Shanghai"), "🇨🇳");
        assert_eq!(flag_for_identifier("America/New_York"), "🇺🇸");
        assert_eq!(flag_for_identifier("Europe/London"), "🇬🇧");
    }

    #[test]
    fn unknown_zone_renders_globe() {
        assert_eq!(flag_for_identifier("UTC"), GLOBE);
        assert_eq!(flag_for_identifier("Etc/GMT+4"), GLOBE);
        assert_eq!(flag_for_identifier("Asia/Pyongyang"), GLOBE);
    }

    #[test]
    fn region_codes_are_two_uppercase_letters() {
        for (_, region) in ZONE_REGIONS {
            assert_eq!(region.len(), 2);
            assert!(region.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn table_is_free_of_duplicates() {
        for (i, (zone, _)) in ZONE_REGIONS.iter().enumerate() {
            assert!(
                !ZONE_REGIONS[i + 1..].iter().any(|(other, _)| other == zone),
                "duplicate entry for {}",
                zone
            );
        }
    }
}

//! Menu-bar label composition
//!
//! Pure with respect to its inputs: the composed label depends only on the
//! instant, the local GMT offset and a settings snapshot, so every trigger
//! (tick or settings change) runs the same full recompute.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::Serialize;

use crate::flags;
use crate::settings::{ComponentKind, Settings};
use crate::zone;

pub const SUN: &str = "☀︎";
pub const MOON: &str = "☽";

/// The individual label pieces, before ordering and joining.
#[derive(Debug, Clone, Serialize)]
pub struct Fragments {
    /// Flag glyph, nickname or city name.
    pub prefix: String,
    /// 24-hour `HH:mm` in the configured zone.
    pub time: String,
    /// Sun or moon glyph for the zone-local hour.
    pub day_night: String,
    /// Signed whole-hour difference from the local zone, empty when zero.
    pub time_difference: String,
}

/// Derive all fragments for `settings` at `now`.
///
/// `local_offset_secs` is the local zone's offset from GMT at `now`.
pub fn derive_fragments(settings: &Settings, now: DateTime<Utc>, local_offset_secs: i32) -> Fragments {
    let (zoned, zone_offset_secs) = match zone::resolve(&settings.time_zone_identifier) {
        Some(tz) => {
            let offset_secs = zone::seconds_from_gmt(tz, now);
            (now.with_timezone(&tz).fixed_offset(), offset_secs)
        }
        None => {
            // Unresolvable identifier: silently substitute the local zone.
            let offset = FixedOffset::east_opt(local_offset_secs).unwrap_or_else(|| Utc.fix());
            (now.with_timezone(&offset), local_offset_secs)
        }
    };

    let time = zoned.format("%H:%M").to_string();

    let hour = zoned.hour();
    let day_night = if (6..18).contains(&hour) { SUN } else { MOON }.to_string();

    let prefix = if settings.show_flag {
        flags::flag_for_identifier(&settings.time_zone_identifier)
    } else if !settings.time_zone_nickname.is_empty() {
        settings.time_zone_nickname.clone()
    } else {
        zone::city_name(&settings.time_zone_identifier)
    };

    let difference_hours = (zone_offset_secs - local_offset_secs) / 3600;
    let time_difference = if difference_hours != 0 {
        format!("{:+}", difference_hours)
    } else {
        String::new()
    };

    Fragments {
        prefix,
        time,
        day_night,
        time_difference,
    }
}

/// Local zone offset from GMT right now, in seconds.
pub fn local_offset_secs() -> i32 {
    chrono::Local::now().offset().local_minus_utc()
}

/// Join the enabled fragments in the configured order.
pub fn compose_label(settings: &Settings, now: DateTime<Utc>, local_offset_secs: i32) -> String {
    let fragments = derive_fragments(settings, now, local_offset_secs);
    let mut parts: Vec<&str> = Vec::with_capacity(settings.component_order.len());

    for kind in &settings.component_order {
        match kind {
            ComponentKind::Flag => {
                if !fragments.prefix.is_empty() {
                    parts.push(&fragments.prefix);
                }
            }
            ComponentKind::Time => parts.push(&fragments.time),
            ComponentKind::TimeDifference => {
                if settings.show_time_difference && !fragments.time_difference.is_empty() {
                    parts.push(&fragments.time_difference);
                }
            }
            ComponentKind::DayNight => parts.push(&fragments.day_night),
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        )
    }

    fn shanghai_settings() -> Settings {
        Settings {
            time_zone_identifier: "Asia/Shanghai".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn shanghai_afternoon_from_utc_local() {
        // 06:30 UTC is 14:30 in Shanghai.
        let settings = shanghai_settings();
        let label = compose_label(&settings, at(6, 30), 0);
        assert_eq!(label, "🇨🇳 14:30 +8 ☀︎");
    }

    #[test]
    fn fragments_for_shanghai() {
        let settings = shanghai_settings();
        let fragments = derive_fragments(&settings, at(6, 30), 0);
        assert_eq!(fragments.time, "14:30");
        assert_eq!(fragments.day_night, SUN);
        assert_eq!(fragments.time_difference, "+8");
        assert_eq!(fragments.prefix, "🇨🇳");
    }

    #[test]
    fn negative_difference_has_explicit_sign() {
        let settings = Settings {
            time_zone_identifier: "America/New_York".to_string(),
            ..Settings::default()
        };
        // June: New York is UTC-4.
        let fragments = derive_fragments(&settings, at(12, 0), 0);
        assert_eq!(fragments.time_difference, "-4");
    }

    #[test]
    fn zero_difference_is_empty_and_omitted() {
        let settings = Settings {
            time_zone_identifier: "Europe/London".to_string(),
            show_flag: false,
            ..Settings::default()
        };
        // June: London is UTC+1; use a matching local offset.
        let fragments = derive_fragments(&settings, at(12, 0), 3600);
        assert_eq!(fragments.time_difference, "");
        let label = compose_label(&settings, at(12, 0), 3600);
        assert_eq!(label, "London 13:00 ☀︎");
    }

    #[test]
    fn day_boundary_is_half_open() {
        let settings = Settings {
            time_zone_identifier: "UTC".to_string(),
            ..Settings::default()
        };
        assert_eq!(derive_fragments(&settings, at(6, 0), 0).day_night, SUN);
        assert_eq!(derive_fragments(&settings, at(17, 59), 0).day_night, SUN);
        assert_eq!(derive_fragments(&settings, at(18, 0), 0).day_night, MOON);
        assert_eq!(derive_fragments(&settings, at(5, 59), 0).day_night, MOON);
    }

    #[test]
    fn nickname_overrides_city_name_when_flag_off() {
        let settings = Settings {
            time_zone_identifier: "America/New_York".to_string(),
            time_zone_nickname: "HQ".to_string(),
            show_flag: false,
            ..Settings::default()
        };
        assert_eq!(derive_fragments(&settings, at(12, 0), 0).prefix, "HQ");
    }

    #[test]
    fn city_name_prefix_when_flag_off_and_no_nickname() {
        let settings = Settings {
            time_zone_identifier: "America/New_York".to_string(),
            show_flag: false,
            ..Settings::default()
        };
        assert_eq!(derive_fragments(&settings, at(12, 0), 0).prefix, "New York");
    }

    #[test]
    fn nickname_is_ignored_while_flag_is_shown() {
        let settings = Settings {
            time_zone_identifier: "Asia/Shanghai".to_string(),
            time_zone_nickname: "HQ".to_string(),
            show_flag: true,
            ..Settings::default()
        };
        assert_eq!(derive_fragments(&settings, at(12, 0), 0).prefix, "🇨🇳");
    }

    #[test]
    fn unknown_zone_shows_globe() {
        let settings = Settings {
            time_zone_identifier: "Etc/GMT+4".to_string(),
            ..Settings::default()
        };
        assert_eq!(derive_fragments(&settings, at(12, 0), 0).prefix, crate::flags::GLOBE);
    }

    #[test]
    fn unresolvable_zone_falls_back_to_local() {
        let settings = Settings {
            time_zone_identifier: "Not/A_Zone".to_string(),
            show_flag: false,
            ..Settings::default()
        };
        // Local offset +2h: 12:00 UTC renders as 14:00, no difference fragment.
        let fragments = derive_fragments(&settings, at(12, 0), 2 * 3600);
        assert_eq!(fragments.time, "14:00");
        assert_eq!(fragments.time_difference, "");
        assert_eq!(fragments.prefix, "A Zone");
    }

    #[test]
    fn label_preserves_component_order() {
        let settings = Settings {
            time_zone_identifier: "Asia/Shanghai".to_string(),
            component_order: vec![
                ComponentKind::Time,
                ComponentKind::DayNight,
                ComponentKind::TimeDifference,
                ComponentKind::Flag,
            ],
            ..Settings::default()
        };
        let label = compose_label(&settings, at(6, 30), 0);
        assert_eq!(label, "14:30 ☀︎ +8 🇨🇳");
    }

    #[test]
    fn hidden_difference_is_skipped_even_when_ordered() {
        let settings = Settings {
            time_zone_identifier: "Asia/Shanghai".to_string(),
            show_time_difference: false,
            ..Settings::default()
        };
        let label = compose_label(&settings, at(6, 30), 0);
        assert_eq!(label, "🇨🇳 14:30 ☀︎");
    }

    #[test]
    fn difference_truncates_toward_zero() {
        let settings = Settings {
            time_zone_identifier: "Asia/Kathmandu".to_string(),
            ..Settings::default()
        };
        // Kathmandu is UTC+5:45; 5.75 truncates to +5.
        let fragments = derive_fragments(&settings, at(12, 0), 0);
        assert_eq!(fragments.time_difference, "+5");

        // From UTC+6 local, the difference is -0:15, truncating to 0.
        let fragments = derive_fragments(&settings, at(12, 0), 6 * 3600);
        assert_eq!(fragments.time_difference, "");
    }
}

//! Circadian buckets
//!
//! Every commit lands in exactly one of four six-hour periods of the local
//! clock: night [0,6), morning [6,12), daytime [12,18), evening [18,24).

use chrono::{DateTime, Local, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// One of the four circadian periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Morning,
    Daytime,
    Evening,
    Night,
}

impl Bucket {
    /// Report order: follows the day, not the counts
    pub fn all() -> &'static [Self] {
        &[Self::Morning, Self::Daytime, Self::Evening, Self::Night]
    }

    /// Map an hour of the day to its period. Hours past 23 wrap around.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            6..=11 => Self::Morning,
            12..=17 => Self::Daytime,
            18..=23 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Daytime => "daytime",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// Label shown in the report, emoji first
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "\u{1F31E} Morning",
            Self::Daytime => "\u{1F306} Daytime",
            Self::Evening => "\u{1F303} Evening",
            Self::Night => "\u{1F319} Night",
        }
    }

    /// README greeting for someone reading it during this period
    pub fn greeting(&self) -> &'static str {
        match self {
            Self::Morning => "#Good Morning \u{1F324}",
            Self::Daytime => "#Good Afternoon \u{2600}\u{FE0F}",
            Self::Evening => "#Good Evening \u{1F306}",
            Self::Night => "#You need to sleep bro! \u{1F634}",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timezone used to read the local hour of an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// An IANA zone such as `Asia/Seoul`
    Named(Tz),
    /// Whatever the host is configured with
    Local,
}

/// A resolved zone, plus the reason if the requested one was unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneChoice {
    pub zone: Zone,
    pub fallback: Option<StatsError>,
}

impl Zone {
    /// Parse an IANA identifier
    pub fn parse(id: &str) -> Result<Self, StatsError> {
        id.trim()
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| StatsError::UnknownTimezone(id.to_string()))
    }

    /// Resolve an optional identifier, degrading to the host zone.
    ///
    /// An absent or blank identifier is not a fallback; an unrecognised one is
    /// reported through [`ZoneChoice::fallback`] so the caller can log it.
    pub fn resolve(id: Option<&str>) -> ZoneChoice {
        match id.map(str::trim).filter(|s| !s.is_empty()) {
            None => ZoneChoice {
                zone: Self::Local,
                fallback: None,
            },
            Some(id) => match Self::parse(id) {
                Ok(zone) => ZoneChoice {
                    zone,
                    fallback: None,
                },
                Err(e) => ZoneChoice {
                    zone: Self::Local,
                    fallback: Some(e),
                },
            },
        }
    }

    /// Hour of the day (0-23) of `instant` in this zone
    pub fn hour_of(&self, instant: DateTime<Utc>) -> u32 {
        match self {
            Self::Named(tz) => instant.with_timezone(tz).hour(),
            Self::Local => instant.with_timezone(&Local).hour(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Named(tz) => tz.name(),
            Self::Local => "local",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify an instant into its circadian period in `zone`
pub fn bucket_of(instant: DateTime<Utc>, zone: &Zone) -> Bucket {
    Bucket::from_hour(zone.hour_of(instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_every_hour_has_exactly_one_bucket() {
        for hour in 0..24 {
            let matches = [
                (6..12).contains(&hour),
                (12..18).contains(&hour),
                (18..24).contains(&hour),
                (0..6).contains(&hour),
            ];
            assert_eq!(matches.iter().filter(|m| **m).count(), 1);

            let expected = match matches.iter().position(|m| *m).unwrap() {
                0 => Bucket::Morning,
                1 => Bucket::Daytime,
                2 => Bucket::Evening,
                _ => Bucket::Night,
            };
            assert_eq!(Bucket::from_hour(hour), expected, "hour {}", hour);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(Bucket::from_hour(0), Bucket::Night);
        assert_eq!(Bucket::from_hour(5), Bucket::Night);
        assert_eq!(Bucket::from_hour(6), Bucket::Morning);
        assert_eq!(Bucket::from_hour(11), Bucket::Morning);
        assert_eq!(Bucket::from_hour(12), Bucket::Daytime);
        assert_eq!(Bucket::from_hour(18), Bucket::Evening);
        assert_eq!(Bucket::from_hour(23), Bucket::Evening);
        assert_eq!(Bucket::from_hour(24), Bucket::Night);
    }

    #[test]
    fn test_bucket_of_utc() {
        let zone = Zone::parse("UTC").unwrap();
        assert_eq!(bucket_of(utc(8, 0), &zone), Bucket::Morning);
        assert_eq!(bucket_of(utc(20, 0), &zone), Bucket::Evening);
        assert_eq!(bucket_of(utc(5, 59), &zone), Bucket::Night);
    }

    #[test]
    fn test_bucket_of_shifts_with_zone() {
        // 23:30 UTC is 08:30 the next day in Seoul (UTC+9)
        let seoul = Zone::parse("Asia/Seoul").unwrap();
        assert_eq!(bucket_of(utc(23, 30), &seoul), Bucket::Morning);

        // and 19:30 the same day in New York (UTC-4 once DST starts)
        let new_york = Zone::parse("America/New_York").unwrap();
        assert_eq!(new_york.hour_of(utc(23, 30)), 19);
        assert_eq!(bucket_of(utc(23, 30), &new_york), Bucket::Evening);
    }

    #[test]
    fn test_resolve_fallback() {
        let choice = Zone::resolve(Some("Mars/Olympus_Mons"));
        assert_eq!(choice.zone, Zone::Local);
        assert_eq!(
            choice.fallback,
            Some(StatsError::UnknownTimezone("Mars/Olympus_Mons".to_string()))
        );

        let choice = Zone::resolve(None);
        assert_eq!(choice.zone, Zone::Local);
        assert!(choice.fallback.is_none());

        let choice = Zone::resolve(Some("  "));
        assert!(choice.fallback.is_none());

        let choice = Zone::resolve(Some("Europe/Berlin"));
        assert_eq!(choice.zone.name(), "Europe/Berlin");
        assert!(choice.fallback.is_none());
    }

    #[test]
    fn test_report_order() {
        let order: Vec<_> = Bucket::all().iter().map(|b| b.as_str()).collect();
        assert_eq!(order, vec!["morning", "daytime", "evening", "night"]);
    }
}

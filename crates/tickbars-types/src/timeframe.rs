//! Bar resampling timeframe definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Width of the buckets ticks are resampled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1-second bars.
    #[serde(rename = "s1")]
    Second1,
    /// 1-minute bars.
    #[default]
    #[serde(rename = "m1")]
    Minute1,
    /// 5-minute bars.
    #[serde(rename = "m5")]
    Minute5,
    /// 15-minute bars.
    #[serde(rename = "m15")]
    Minute15,
    /// 30-minute bars.
    #[serde(rename = "m30")]
    Minute30,
    /// 1-hour bars.
    #[serde(rename = "h1")]
    Hour1,
    /// 4-hour bars.
    #[serde(rename = "h4")]
    Hour4,
    /// Daily bars.
    #[serde(rename = "d1")]
    Day1,
}

impl Timeframe {
    /// Returns the bar width in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        match self {
            Self::Second1 => 1,
            Self::Minute1 => 60,
            Self::Minute5 => 300,
            Self::Minute15 => 900,
            Self::Minute30 => 1800,
            Self::Hour1 => 3600,
            Self::Hour4 => 14400,
            Self::Day1 => 86400,
        }
    }

    /// Returns the bar width in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.seconds() * 1000
    }

    /// Returns the bar width as a [`TimeDelta`].
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds())
    }

    /// Returns the timeframe as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second1 => "s1",
            Self::Minute1 => "m1",
            Self::Minute5 => "m5",
            Self::Minute15 => "m15",
            Self::Minute30 => "m30",
            Self::Hour1 => "h1",
            Self::Hour4 => "h4",
            Self::Day1 => "d1",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Second1,
            Self::Minute1,
            Self::Minute5,
            Self::Minute15,
            Self::Minute30,
            Self::Hour1,
            Self::Hour4,
            Self::Day1,
        ]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    /// Accepts short identifiers (`m1`, `1h`) and pandas-style offsets (`1min`, `5min`, `1H`).
    ///
    /// Matching is case-insensitive except for a trailing `M`, which is the
    /// pandas month offset and is rejected rather than read as minutes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.ends_with('M') {
            return Err(TimeframeParseError(s.to_string()));
        }

        match s.to_lowercase().as_str() {
            "s1" | "1s" | "second" | "1sec" => Ok(Self::Second1),
            "m1" | "1m" | "minute" | "1min" | "1t" => Ok(Self::Minute1),
            "m5" | "5m" | "5min" | "5t" => Ok(Self::Minute5),
            "m15" | "15m" | "15min" | "15t" => Ok(Self::Minute15),
            "m30" | "30m" | "30min" | "30t" => Ok(Self::Minute30),
            "h1" | "1h" | "hour" => Ok(Self::Hour1),
            "h4" | "4h" => Ok(Self::Hour4),
            "d1" | "1d" | "day" | "daily" => Ok(Self::Day1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: 1s, 1min, 5min, 15min, 30min, 1h, 4h, 1d",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_seconds() {
        assert_eq!(Timeframe::default(), Timeframe::Minute1);
        assert_eq!(Timeframe::Minute1.seconds(), 60);
        assert_eq!(Timeframe::Hour4.milliseconds(), 14_400_000);
        assert_eq!(Timeframe::Day1.duration(), TimeDelta::days(1));
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("1min".parse::<Timeframe>().unwrap(), Timeframe::Minute1);
        assert_eq!("5min".parse::<Timeframe>().unwrap(), Timeframe::Minute5);
        assert_eq!("1H".parse::<Timeframe>().unwrap(), Timeframe::Hour1);
        assert_eq!("m15".parse::<Timeframe>().unwrap(), Timeframe::Minute15);
        assert!("7min".parse::<Timeframe>().is_err());
        assert!("1M".parse::<Timeframe>().is_err());
        assert_eq!("M1".parse::<Timeframe>().unwrap(), Timeframe::Minute1);
        assert_eq!("1m".parse::<Timeframe>().unwrap(), Timeframe::Minute1);
    }
}

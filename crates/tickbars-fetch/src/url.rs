//! Dukascopy URL construction.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Base URL for the Dukascopy data feed.
pub const BASE_URL: &str = "https://datafeed.dukascopy.com/datafeed";

/// Builds the URL for a specific hour's tick file on the public feed.
///
/// URL format: `{BASE_URL}/{SYMBOL}/{YEAR}/{MONTH}/{DAY}/{HOUR}h_ticks.bi5`
///
/// Note: Dukascopy uses 0-indexed months (January = 00).
///
/// # Example
///
/// ```
/// use tickbars_fetch::url::tick_url;
/// use chrono::{TimeZone, Utc};
///
/// let hour = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// let url = tick_url("eurusd", hour);
/// assert_eq!(url, "https://datafeed.dukascopy.com/datafeed/EURUSD/2024/00/15/12h_ticks.bi5");
/// ```
#[must_use]
pub fn tick_url(symbol: &str, hour: DateTime<Utc>) -> String {
    tick_url_with_base(BASE_URL, symbol, hour)
}

/// Builds a tick file URL against an arbitrary feed root.
#[must_use]
pub fn tick_url_with_base(base: &str, symbol: &str, hour: DateTime<Utc>) -> String {
    format!(
        "{}/{}/{}/{:02}/{:02}/{:02}h_ticks.bi5",
        base.trim_end_matches('/'),
        symbol.to_uppercase(),
        hour.year(),
        hour.month0(),
        hour.day(),
        hour.hour()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tick_url_december() {
        let hour = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        let url = tick_url("xauusd", hour);
        assert_eq!(
            url,
            "https://datafeed.dukascopy.com/datafeed/XAUUSD/2024/11/31/23h_ticks.bi5"
        );
    }

    #[test]
    fn test_tick_url_pads_fields() {
        let hour = Utc.with_ymd_and_hms(2010, 3, 5, 7, 0, 0).unwrap();
        let url = tick_url_with_base("http://127.0.0.1:9000/", "GBPUSD", hour);
        assert_eq!(url, "http://127.0.0.1:9000/GBPUSD/2010/02/05/07h_ticks.bi5");
    }
}

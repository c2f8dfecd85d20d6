//! Relative "created" time window selection and its resolved filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Window the user picked in the date picker. `None` is the default and
/// means "no lower bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFilter {
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "24hours")]
    TwentyFourHours,
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[default]
    #[serde(rename = "none")]
    None,
}

impl TimeFilter {
    /// Selectable windows, in picker order.
    pub const WINDOWS: [TimeFilter; 4] = [
        TimeFilter::OneHour,
        TimeFilter::TwentyFourHours,
        TimeFilter::SevenDays,
        TimeFilter::ThirtyDays,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            TimeFilter::OneHour => "1hour",
            TimeFilter::TwentyFourHours => "24hours",
            TimeFilter::SevenDays => "7days",
            TimeFilter::ThirtyDays => "30days",
            TimeFilter::None => "none",
        }
    }

    /// Width of the window, `None` when unbounded.
    pub fn window_seconds(&self) -> Option<i64> {
        match self {
            TimeFilter::OneHour => Some(SECONDS_PER_HOUR),
            TimeFilter::TwentyFourHours => Some(SECONDS_PER_DAY),
            TimeFilter::SevenDays => Some(7 * SECONDS_PER_DAY),
            TimeFilter::ThirtyDays => Some(30 * SECONDS_PER_DAY),
            TimeFilter::None => None,
        }
    }

    fn short_label(&self) -> &'static str {
        match self {
            TimeFilter::OneHour => "1h",
            TimeFilter::TwentyFourHours => "24h",
            TimeFilter::SevenDays => "7d",
            TimeFilter::ThirtyDays => "30d",
            TimeFilter::None => "",
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for TimeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1hour" => Ok(TimeFilter::OneHour),
            "24hours" => Ok(TimeFilter::TwentyFourHours),
            "7days" => Ok(TimeFilter::SevenDays),
            "30days" => Ok(TimeFilter::ThirtyDays),
            "" | "none" => Ok(TimeFilter::None),
            other => Err(AppError::BadRequest(format!(
                "unknown time filter '{}', expected one of 1hour, 24hours, 7days, 30days, none",
                other
            ))),
        }
    }
}

/// Resolved "created at or after" constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFilter {
    /// Query fragment appended verbatim to list URLs, empty when unbounded.
    pub filter_string: String,
    pub filter_short_string: String,
    /// Lower bound in unix seconds; `None` means no lower bound.
    pub filter_time: Option<i64>,
}

impl CreatedFilter {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Turn a window selection into the backend filter fragment and lower bound.
///
/// Pure: all arithmetic is in UTC epoch seconds and depends only on the
/// arguments.
pub fn resolve(selection: TimeFilter, now: i64) -> CreatedFilter {
    match selection.window_seconds() {
        None => CreatedFilter::unbounded(),
        Some(window) => {
            let lower_bound = now - window;
            CreatedFilter {
                filter_string: format!("&created=>={}", lower_bound),
                filter_short_string: selection.short_label().to_string(),
                filter_time: Some(lower_bound),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_100_000;

    #[test]
    fn bounded_windows_subtract_their_width() {
        let expected = [
            (TimeFilter::OneHour, 3_600),
            (TimeFilter::TwentyFourHours, 86_400),
            (TimeFilter::SevenDays, 604_800),
            (TimeFilter::ThirtyDays, 2_592_000),
        ];
        for (selection, secs) in expected {
            let created = resolve(selection, NOW);
            assert_eq!(created.filter_time, Some(NOW - secs), "{}", selection);
            assert_eq!(created.filter_string, format!("&created=>={}", NOW - secs));
        }
    }

    #[test]
    fn none_is_unbounded_for_any_now() {
        for now in [0, 1, NOW, i64::MAX] {
            let created = resolve(TimeFilter::None, now);
            assert_eq!(created.filter_string, "");
            assert_eq!(created.filter_short_string, "");
            assert!(created.filter_time.is_none());
        }
    }

    #[test]
    fn twenty_four_hours_matches_dashboard_scenario() {
        let created = resolve(TimeFilter::TwentyFourHours, NOW);
        assert_eq!(created.filter_time, Some(1_700_013_600));
        assert_eq!(created.filter_short_string, "24h");
    }

    #[test]
    fn resolve_is_idempotent() {
        for selection in TimeFilter::WINDOWS {
            assert_eq!(resolve(selection, NOW), resolve(selection, NOW));
        }
    }

    #[test]
    fn parse_rejects_unknown_selection() {
        assert_eq!("7days".parse::<TimeFilter>().unwrap(), TimeFilter::SevenDays);
        assert_eq!("".parse::<TimeFilter>().unwrap(), TimeFilter::None);
        assert!("2weeks".parse::<TimeFilter>().is_err());
    }

    #[test]
    fn serde_uses_picker_codes() {
        let json = serde_json::to_string(&TimeFilter::TwentyFourHours).unwrap();
        assert_eq!(json, "\"24hours\"");
        let parsed: TimeFilter = serde_json::from_str("\"30days\"").unwrap();
        assert_eq!(parsed, TimeFilter::ThirtyDays);
    }
}

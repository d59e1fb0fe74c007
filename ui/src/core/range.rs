//! Inclusive calendar-date window applied to dataset keys.

use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};

/// Start/end bounds as the date inputs hold them (`YYYY-MM-DD`). Blank or
/// unparseable bounds constrain nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn starting(start: &str) -> Self {
        Self::new(Some(start), None)
    }

    pub fn ending(end: &str) -> Self {
        Self::new(None, Some(end))
    }

    /// True when at least one bound holds text. Whether that text parses is
    /// decided later by [`DateRange::window`].
    pub fn is_bounded(&self) -> bool {
        has_text(self.start.as_deref()) || has_text(self.end.as_deref())
    }

    pub fn window(&self) -> DateWindow {
        DateWindow {
            start: self.start.as_deref().and_then(parse_calendar_date),
            end: self.end.as_deref().and_then(parse_calendar_date),
        }
    }
}

fn has_text(bound: Option<&str>) -> bool {
    bound.is_some_and(|text| !text.trim().is_empty())
}

/// Parsed bounds, ready to test keys against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateWindow {
    /// Keys that do not parse as a calendar date are kept: a comparison
    /// against them cannot fail.
    pub fn admits(&self, key: &str) -> bool {
        let Some(date) = parse_calendar_date(key) else {
            return true;
        };
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end.is_some_and(|end| date > end) {
            return false;
        }
        true
    }
}

/// `YYYY-MM-DD`, optionally followed by a `T` or space and a time part which
/// is ignored.
pub fn parse_calendar_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    let day = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_plain_and_timestamped_keys() {
        assert_eq!(parse_calendar_date("2024-01-02"), Some(date!(2024 - 01 - 02)));
        assert_eq!(
            parse_calendar_date("2024-01-02T23:59:00Z"),
            Some(date!(2024 - 01 - 02))
        );
        assert_eq!(parse_calendar_date(" 2024-01-02 08:00"), Some(date!(2024 - 01 - 02)));
        assert_eq!(parse_calendar_date("2024-13-40"), None);
        assert_eq!(parse_calendar_date("yesterday"), None);
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = DateRange::new(Some("2024-01-02"), Some("2024-01-04")).window();
        assert!(!window.admits("2024-01-01"));
        assert!(window.admits("2024-01-02"));
        assert!(window.admits("2024-01-04"));
        assert!(!window.admits("2024-01-05"));
    }

    #[test]
    fn blank_or_garbage_bounds_constrain_nothing() {
        assert!(!DateRange::new(Some(""), Some("  ")).is_bounded());

        let window = DateRange::new(Some("not a date"), Some("2024-01-03")).window();
        assert_eq!(window.start, None);
        assert!(window.admits("1999-12-31"));
        assert!(!window.admits("2024-01-04"));
    }

    #[test]
    fn unparseable_keys_are_kept() {
        let window = DateRange::starting("2024-01-02").window();
        assert!(window.admits("summary"));
    }
}

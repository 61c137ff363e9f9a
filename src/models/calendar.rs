use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

/// Number of days covered by one shopping run.
pub const WINDOW_LEN: usize = 7;

/// Full weekday names, as plan tabs are titled.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Whether `name` is a full weekday name (case-insensitive).
pub fn is_weekday_name(name: &str) -> bool {
    let name = name.trim();
    WEEKDAY_NAMES.iter().any(|day| day.eq_ignore_ascii_case(name))
}

/// The seven consecutive dates starting at a caller-supplied "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    days: Vec<NaiveDate>,
}

impl CalendarWindow {
    pub fn starting(today: NaiveDate) -> Self {
        let days = (0..WINDOW_LEN as i64)
            .map(|offset| today + Duration::days(offset))
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Date in the window whose full weekday name matches `name` (case-insensitive).
    pub fn by_weekday_name(&self, name: &str) -> Option<NaiveDate> {
        let wanted = name.trim().to_lowercase();
        self.days
            .iter()
            .copied()
            .find(|day| day.format("%A").to_string().to_lowercase() == wanted)
    }

    /// Dates selected by weekday name; an empty selection means the whole window.
    ///
    /// Unknown names are ignored.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> BTreeSet<NaiveDate> {
        if names.is_empty() {
            return self.days.iter().copied().collect();
        }
        names
            .iter()
            .filter_map(|name| self.by_weekday_name(name.as_ref()))
            .collect()
    }
}

/// Sorted, comma separated day list in parentheses, e.g. `(Sun,Mon)`.
pub fn day_shortstr(days: &BTreeSet<NaiveDate>, fmt: &str) -> String {
    let parts: Vec<String> = days.iter().map(|d| d.format(fmt).to_string()).collect();
    format!("({})", parts.join(","))
}

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::AttributedCalendar;
use crate::error::Error;

/// A validated calendar year, written with exactly 4 digits.
///
/// ```
/// use residency_days::Year;
///
/// assert_eq!("2014".parse::<Year>().unwrap().get(), 2014);
/// assert!("14".parse::<Year>().is_err());
/// assert!("+2014".parse::<Year>().is_err());
/// assert!(Year::new(10_000).is_err());
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(i32);

impl Year {
    pub const MIN: Year = Year(1000);
    pub const MAX: Year = Year(9999);

    pub fn new(year: i32) -> Result<Self, Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&year) {
            Ok(Self(year))
        } else {
            Err(Error::InvalidYear(year.to_string()))
        }
    }

    /// Year of a given date, if it can be written with 4 digits.
    pub fn of(date: NaiveDate) -> Option<Self> {
        Self::new(date.year()).ok()
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.0
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidYear(s.to_string()));
        }

        let year = trimmed
            .parse()
            .map_err(|_| Error::InvalidYear(s.to_string()))?;

        Self::new(year).map_err(|_| Error::InvalidYear(s.to_string()))
    }
}

impl TryFrom<i32> for Year {
    type Error = Error;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// An attributed calendar restricted to the requested window, along with the
/// part of the baseline that applies to this window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilteredCalendar {
    pub calendar: AttributedCalendar,
    pub year: Option<Year>,
    /// Baseline days to add to the home country in this window.
    pub baseline: u32,
}

/// Get the year the home country baseline belongs to.
///
/// The baseline represents days spent at home before tracking started, so it
/// is anchored to the first tracked year of the home country, or to the first
/// tracked year at all if the home country was never attributed any day. An
/// empty calendar has no anchor.
pub fn baseline_anchor(calendar: &AttributedCalendar, home: &str) -> Option<i32> {
    calendar
        .days(home)
        .and_then(|days| days.first())
        .or_else(|| calendar.first_date())
        .map(|date| date.year())
}

/// Restrict a calendar to a given year, or keep it whole if no year is given.
pub fn filter_year(
    calendar: AttributedCalendar,
    year: Option<Year>,
    home: &str,
    baseline: u32,
) -> FilteredCalendar {
    let Some(year) = year else {
        return FilteredCalendar { calendar, year, baseline };
    };

    let baseline = match baseline_anchor(&calendar, home) {
        Some(anchor) if anchor != year.get() => 0,
        _ => baseline,
    };

    FilteredCalendar {
        calendar: calendar.restrict_to_year(year.get()),
        year: Some(year),
        baseline,
    }
}

use std::ops::Deref;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::year_filter::FilteredCalendar;

/// Days spent in a country.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDays {
    pub country: String,
    /// Number of days spent, including the baseline for the home country.
    pub day_count: u32,
    /// Attributed days, in chronological order.
    pub dates: Vec<NaiveDate>,
}

/// Days spent per country, sorted by country name.
///
/// ```
/// use residency_days::{compute, AttributionPolicy, LocationEvent};
///
/// let events = [
///     LocationEvent::new("vietnam", "2014-01-01T06:00:00"),
///     LocationEvent::new("israel", "2014-01-04T06:00:00"),
/// ];
///
/// let report = compute(&events, "israel", 0, AttributionPolicy::Strict, None).unwrap();
/// assert_eq!(report.days_in("vietnam"), 3);
/// assert_eq!(report.days_in("israel"), 1);
/// assert_eq!(report.days_in("china"), 0);
/// ```
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(Vec<CountryDays>);

impl Report {
    /// Get the entry of a country, if any day is counted there.
    pub fn get(&self, country: &str) -> Option<&CountryDays> {
        self.0
            .binary_search_by(|entry| entry.country.as_str().cmp(country))
            .ok()
            .map(|idx| &self.0[idx])
    }

    /// Count days spent in a country, zero if it doesn't appear in the report.
    pub fn days_in(&self, country: &str) -> u32 {
        self.get(country).map(|entry| entry.day_count).unwrap_or(0)
    }

    pub fn into_inner(self) -> Vec<CountryDays> {
        self.0
    }
}

impl Deref for Report {
    type Target = [CountryDays];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Report {
    type Item = CountryDays;
    type IntoIter = std::vec::IntoIter<CountryDays>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'r> IntoIterator for &'r Report {
    type Item = &'r CountryDays;
    type IntoIter = std::slice::Iter<'r, CountryDays>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Turn a filtered calendar into the final per-country report.
///
/// Baseline days that apply to the window are added to the home country,
/// which is listed even if it has no attributed day in the window.
pub fn aggregate(filtered: FilteredCalendar, home: &str) -> Report {
    let FilteredCalendar { calendar, baseline, .. } = filtered;

    let mut entries: Vec<CountryDays> = calendar
        .iter()
        .map(|(country, days)| {
            let extra = if country == home { baseline } else { 0 };

            CountryDays {
                country: country.to_string(),
                day_count: days.count().saturating_add(extra),
                dates: days.iter().collect(),
            }
        })
        .filter(|entry| entry.day_count > 0)
        .collect();

    if baseline > 0 && calendar.days(home).is_none() {
        entries.push(CountryDays {
            country: home.to_string(),
            day_count: baseline,
            dates: Vec::new(),
        });
    }

    entries.sort_by(|a, b| a.country.cmp(&b.country));
    Report(entries)
}

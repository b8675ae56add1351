use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use compact_days::CompactDays;

/// Days attributed to each country.
///
/// Countries are kept in ascending order of their names and a country is
/// only listed once at least one day has been attributed to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributedCalendar {
    countries: BTreeMap<String, CompactDays>,
}

impl AttributedCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute a day to a country. Return false if this day was already
    /// attributed to this country.
    pub fn attribute(&mut self, country: &str, date: NaiveDate) -> bool {
        if let Some(days) = self.countries.get_mut(country) {
            return days.insert(date);
        }

        let mut days = CompactDays::new();
        days.insert(date);
        self.countries.insert(country.to_string(), days);
        true
    }

    /// Get the days attributed to a country.
    pub fn days(&self, country: &str) -> Option<&CompactDays> {
        self.countries.get(country)
    }

    /// Count days attributed to a country.
    pub fn count(&self, country: &str) -> u32 {
        self.days(country).map(CompactDays::count).unwrap_or(0)
    }

    /// Iterate over countries and their days, by ascending country name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompactDays)> + '_ {
        self.countries.iter().map(|(name, days)| (name.as_str(), days))
    }

    /// Get the country a day is attributed to.
    pub fn owner_of(&self, date: NaiveDate) -> Option<&str> {
        self.iter()
            .find(|(_, days)| days.contains(date))
            .map(|(name, _)| name)
    }

    /// Get the earliest day attributed to any country.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.countries.values().filter_map(CompactDays::first).min()
    }

    /// Count days attributed to all countries.
    pub fn total_days(&self) -> u32 {
        self.countries.values().map(CompactDays::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.values().all(CompactDays::is_empty)
    }

    /// Restrict this calendar to the days of a single year, countries left
    /// without any day are dropped.
    pub fn restrict_to_year(&self, year: i32) -> Self {
        let countries = self
            .countries
            .iter()
            .map(|(name, days)| (name, days.restrict_to_year(year)))
            .filter(|(_, days)| !days.is_empty())
            .map(|(name, days)| (name.clone(), days))
            .collect();

        Self { countries }
    }

    /// Check that all days belong to the given year.
    pub fn is_within_year(&self, year: i32) -> bool {
        self.countries
            .values()
            .flat_map(|days| days.iter())
            .all(|date| date.year() == year)
    }
}

#![doc = include_str!("../README.md")]

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};

/// An ordered set of calendar days, using u32-based bit arrays for each month.
///
/// The range of covered years grows as days are inserted, so there is no need
/// to know the bounds of the set ahead of time.
#[derive(Clone, Default)]
pub struct CompactDays {
    first_year: i32,
    years: Vec<CompactYear>,
}

impl CompactDays {
    /// Create a set that does not include any day.
    ///
    /// ```
    /// use compact_days::CompactDays;
    ///
    /// let days = CompactDays::new();
    /// assert!(days.is_empty());
    /// assert_eq!(days.count(), 0);
    /// ```
    pub const fn new() -> Self {
        Self { first_year: 0, years: Vec::new() }
    }

    fn year_index(&self, year: i32) -> Option<usize> {
        let year0 = usize::try_from(i64::from(year) - i64::from(self.first_year)).ok()?;
        (year0 < self.years.len()).then_some(year0)
    }

    /// Make room for `year` and return its index.
    fn reserve_year(&mut self, year: i32) -> usize {
        if self.years.is_empty() {
            self.first_year = year;
            self.years.push(CompactYear::new());
            return 0;
        }

        if year < self.first_year {
            let missing = (self.first_year - year) as usize;
            self.years
                .splice(0..0, std::iter::repeat(CompactYear::new()).take(missing));
            self.first_year = year;
            return 0;
        }

        let year0 = (year - self.first_year) as usize;

        if year0 >= self.years.len() {
            self.years.resize(year0 + 1, CompactYear::new());
        }

        year0
    }

    /// Include a day in this set. Return true if the day was not already
    /// included.
    ///
    /// ```
    /// use compact_days::CompactDays;
    /// use chrono::NaiveDate;
    ///
    /// let day1 = NaiveDate::from_ymd_opt(2013, 11, 3).unwrap();
    /// let day2 = NaiveDate::from_ymd_opt(1999, 3, 5).unwrap();
    ///
    /// let mut days = CompactDays::new();
    /// assert!(days.insert(day1));
    /// assert!(!days.insert(day1));
    /// assert!(days.insert(day2));
    /// assert_eq!(days.count(), 2);
    /// ```
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        let year0 = self.reserve_year(date.year());
        self.years[year0].insert(date.month(), date.day())
    }

    /// Check if this set includes the given day.
    ///
    /// ```
    /// use compact_days::CompactDays;
    /// use chrono::NaiveDate;
    ///
    /// let day1 = NaiveDate::from_ymd_opt(2013, 11, 3).unwrap();
    /// let day2 = NaiveDate::from_ymd_opt(2022, 3, 5).unwrap();
    ///
    /// let days: CompactDays = [day1].into_iter().collect();
    /// assert!(days.contains(day1));
    /// assert!(!days.contains(day2));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.year_index(date.year())
            .is_some_and(|year0| self.years[year0].contains(date.month(), date.day()))
    }

    /// Iterate over the days included in this set, in chronological order.
    ///
    /// ```
    /// use compact_days::CompactDays;
    /// use chrono::NaiveDate;
    ///
    /// let day1 = NaiveDate::from_ymd_opt(2013, 11, 3).unwrap();
    /// let day2 = NaiveDate::from_ymd_opt(2022, 3, 5).unwrap();
    /// let day3 = NaiveDate::from_ymd_opt(2022, 8, 12).unwrap();
    ///
    /// let days: CompactDays = [day3, day1, day2].into_iter().collect();
    /// assert_eq!(days.iter().collect::<Vec<_>>(), [day1, day2, day3]);
    /// ```
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        let first_year = self.first_year;

        self.years.iter().enumerate().flat_map(move |(year0, year)| {
            let year_i = first_year + year0 as i32;

            year.iter().map(move |(month, day)| {
                NaiveDate::from_ymd_opt(year_i, month, day)
                    .expect("invalid date stored in compact days")
            })
        })
    }

    /// Count number of days included in this set.
    pub fn count(&self) -> u32 {
        self.years.iter().map(CompactYear::count).sum()
    }

    /// Check if this set does not include any day.
    pub fn is_empty(&self) -> bool {
        self.years.iter().all(CompactYear::is_empty)
    }

    /// Get the earliest day of this set.
    ///
    /// ```
    /// use compact_days::CompactDays;
    /// use chrono::NaiveDate;
    ///
    /// let mut days = CompactDays::new();
    /// assert_eq!(days.first(), None);
    ///
    /// days.insert(NaiveDate::from_ymd_opt(2014, 5, 1).unwrap());
    /// days.insert(NaiveDate::from_ymd_opt(2012, 2, 29).unwrap());
    /// assert_eq!(days.first(), NaiveDate::from_ymd_opt(2012, 2, 29));
    /// ```
    pub fn first(&self) -> Option<NaiveDate> {
        self.iter().next()
    }

    /// Get the latest day of this set.
    pub fn last(&self) -> Option<NaiveDate> {
        self.iter().next_back()
    }

    /// Build a new set that only includes the days of given year.
    ///
    /// ```
    /// use compact_days::CompactDays;
    /// use chrono::NaiveDate;
    ///
    /// let days: CompactDays = [
    ///     NaiveDate::from_ymd_opt(2013, 12, 31).unwrap(),
    ///     NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2014, 6, 1).unwrap(),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// assert_eq!(days.restrict_to_year(2014).count(), 2);
    /// assert!(days.restrict_to_year(2015).is_empty());
    /// ```
    pub fn restrict_to_year(&self, year: i32) -> Self {
        match self.year_index(year) {
            Some(year0) if !self.years[year0].is_empty() => Self {
                first_year: year,
                years: vec![self.years[year0]],
            },
            _ => Self::new(),
        }
    }
}

impl FromIterator<NaiveDate> for CompactDays {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl Extend<NaiveDate> for CompactDays {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        for date in iter {
            self.insert(date);
        }
    }
}

impl PartialEq for CompactDays {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for CompactDays {}

impl Hash for CompactDays {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for date in self.iter() {
            date.hash(state);
        }
    }
}

impl fmt::Debug for CompactDays {
    /// ```
    /// use compact_days::CompactDays;
    /// use chrono::NaiveDate;
    ///
    /// let mut days = CompactDays::new();
    /// days.insert(NaiveDate::from_ymd_opt(2022, 8, 12).unwrap());
    /// days.insert(NaiveDate::from_ymd_opt(2022, 3, 5).unwrap());
    ///
    /// assert_eq!(format!("{days:?}"), "{2022-03-05, 2022-08-12}");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Days included in a single year, as one bit-map per month.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct CompactYear([CompactMonth; 12]);

impl CompactYear {
    /// Create a new year that does not include any day.
    pub const fn new() -> Self {
        Self([CompactMonth::new(); 12])
    }

    /// Include a day in this year, return true if it was not included yet.
    ///
    /// ```
    /// use compact_days::CompactYear;
    ///
    /// let mut year = CompactYear::new();
    /// assert!(year.insert(11, 3));
    /// assert!(!year.insert(11, 3));
    /// assert!(year.insert(1, 25));
    /// assert_eq!(year.count(), 2);
    /// ```
    pub fn insert(&mut self, month: u32, day: u32) -> bool {
        assert!((1..=12).contains(&month));
        self.0[(month - 1) as usize].insert(day)
    }

    /// Check if this year includes the given day.
    pub fn contains(&self, month: u32, day: u32) -> bool {
        assert!((1..=12).contains(&month));
        self.0[(month - 1) as usize].contains(day)
    }

    /// Iterate over the `(month, day)` pairs included in this year.
    ///
    /// ```
    /// use compact_days::CompactYear;
    ///
    /// let mut year = CompactYear::new();
    /// year.insert(9, 5);
    /// year.insert(3, 1);
    ///
    /// let days: Vec<_> = year.iter().collect();
    /// assert_eq!(days, [(3, 1), (9, 5)]);
    /// assert_eq!(year.iter().next_back(), Some((9, 5)));
    /// ```
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, u32)> + '_ {
        self.0.iter().enumerate().flat_map(|(month0, month)| {
            let month_i = month0 as u32 + 1;
            month.iter().map(move |day| (month_i, day))
        })
    }

    /// Count number of days included in this year.
    pub fn count(&self) -> u32 {
        self.0.iter().copied().map(CompactMonth::count).sum()
    }

    /// Check if this year does not include any day.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|month| month.count() == 0)
    }
}

impl fmt::Debug for CompactYear {
    /// ```
    /// use compact_days::CompactYear;
    ///
    /// let mut year = CompactYear::new();
    /// year.insert(11, 3);
    /// year.insert(4, 28);
    /// assert_eq!(format!("{year:?}"), "{04-28, 11-03}");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct MonthDay(u32, u32);

        impl fmt::Debug for MonthDay {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:02}-{:02}", self.0, self.1)
            }
        }

        f.debug_set()
            .entries(self.iter().map(|(month, day)| MonthDay(month, day)))
            .finish()
    }
}

/// Days included in a single month, bit `n` standing for day `n + 1`.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct CompactMonth(u32);

impl CompactMonth {
    /// Create a new month that does not include any day.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Include a day in this month, return true if it was not included yet.
    ///
    /// ```
    /// use compact_days::CompactMonth;
    ///
    /// let mut month = CompactMonth::new();
    /// assert!(month.insert(2));
    /// assert!(!month.insert(2));
    /// assert!(month.insert(19));
    /// assert_eq!(month.count(), 2);
    /// ```
    pub fn insert(&mut self, day: u32) -> bool {
        assert!((1..=31).contains(&day));
        let mask = 1 << (day - 1);
        let inserted = self.0 & mask == 0;
        self.0 |= mask;
        inserted
    }

    /// Check if this month includes the given day.
    pub fn contains(self, day: u32) -> bool {
        assert!((1..=31).contains(&day));
        self.0 & (1 << (day - 1)) != 0
    }

    /// Iterate over the days included in this month.
    ///
    /// ```
    /// use compact_days::CompactMonth;
    ///
    /// let mut month = CompactMonth::new();
    /// month.insert(18);
    /// month.insert(1);
    /// month.insert(31);
    ///
    /// assert_eq!(month.iter().collect::<Vec<_>>(), [1, 18, 31]);
    /// assert_eq!(month.iter().rev().collect::<Vec<_>>(), [31, 18, 1]);
    /// ```
    pub fn iter(self) -> MonthDays {
        MonthDays(self.0)
    }

    /// Count number of days included in this month.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Debug for CompactMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Day(u32);

        impl fmt::Debug for Day {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:02}", self.0)
            }
        }

        f.debug_set().entries(self.iter().map(Day)).finish()
    }
}

/// Iterator over the days of a [`CompactMonth`], consuming bits from both ends.
#[derive(Clone, Debug)]
pub struct MonthDays(u32);

impl Iterator for MonthDays {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.0 == 0 {
            return None;
        }

        let day0 = self.0.trailing_zeros();
        self.0 ^= 1 << day0;
        Some(day0 + 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for MonthDays {
    fn next_back(&mut self) -> Option<u32> {
        if self.0 == 0 {
            return None;
        }

        let day0 = 31 - self.0.leading_zeros();
        self.0 ^= 1 << day0;
        Some(day0 + 1)
    }
}

impl ExactSizeIterator for MonthDays {}

//! Reference timezone used to turn instants into calendar days.
//!
//! A whole computation is evaluated in a single timezone: two events logged at
//! the same instant can fall on different days depending on this choice, so it
//! is never inferred per event.

use std::fmt::Debug;

use chrono::{DateTime, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

/// Convert absolute instants into wall-clock date times of a reference
/// timezone.
pub trait Localize: Clone + Debug {
    /// Get the wall-clock date time of the reference timezone at given
    /// instant.
    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime;

    /// Get the instant at which the reference timezone shows given wall-clock
    /// date time. The earliest instant is picked when it is ambiguous, and a
    /// time skipped by a clock change is read with the offset in effect just
    /// before.
    fn instant(&self, local: NaiveDateTime) -> DateTime<Utc>;
}

/// No timezone information: instants are read in UTC.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct NoLocation;

impl Localize for NoLocation {
    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc()
    }

    fn instant(&self, local: NaiveDateTime) -> DateTime<Utc> {
        local.and_utc()
    }
}

/// Instants are read in a given timezone.
///
/// ```
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
/// use residency_days::localization::{Localize, TzLocation};
///
/// let hanoi = TzLocation::new(FixedOffset::east_opt(7 * 3600).unwrap());
/// let instant = Utc.with_ymd_and_hms(2014, 1, 1, 20, 0, 0).unwrap();
///
/// assert_eq!(
///     hanoi.localize(instant).date(),
///     NaiveDate::from_ymd_opt(2014, 1, 2).unwrap(),
/// );
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TzLocation<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> TzLocation<Tz> {
    /// Create a new location from a timezone.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

#[cfg(feature = "iana-tz")]
impl TzLocation<chrono_tz::Tz> {
    /// Create a location from an IANA timezone name.
    ///
    /// ```
    /// use residency_days::localization::TzLocation;
    ///
    /// assert!(TzLocation::from_name("Asia/Jerusalem").is_some());
    /// assert!(TzLocation::from_name("Middle/Earth").is_none());
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok().map(Self::new)
    }
}

impl<Tz> Localize for TzLocation<Tz>
where
    Tz: TimeZone + Debug,
    Tz::Offset: Debug,
{
    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    fn instant(&self, local: NaiveDateTime) -> DateTime<Utc> {
        if let Some(instant) = self.tz.from_local_datetime(&local).earliest() {
            return instant.with_timezone(&Utc);
        }

        let shift = local
            .checked_sub_signed(TimeDelta::days(1))
            .and_then(|before| self.tz.offset_from_local_datetime(&before).earliest())
            .map_or(0, |offset| offset.fix().local_minus_utc());

        local
            .checked_sub_signed(TimeDelta::seconds(shift.into()))
            .unwrap_or(local)
            .and_utc()
    }
}

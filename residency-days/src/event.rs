use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, MalformedReason, Result};
use crate::localization::Localize;
use crate::year_filter::Year;

/// Formats of timestamps carrying their own UTC offset.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats of timestamps expressed as wall-clock time of the reference
/// timezone.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A location log entry, as persisted for a user.
///
/// ```
/// use residency_days::LocationEvent;
///
/// let event: LocationEvent = serde_json::from_str(
///     r#"{"user_id": "u1", "country": "Vietnam ", "timestamp": "2014-01-01T06:00:00+0000"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(event, LocationEvent::new("Vietnam ", "2014-01-01T06:00:00+0000").with_user("u1"));
/// ```
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEvent {
    /// Owner of the event, all events of a computation share it.
    #[serde(default)]
    pub user_id: String,
    /// Country the user is recorded in as of `timestamp`.
    pub country: String,
    /// Country the user left for, recorded at the next logging action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departed_to: Option<String>,
    /// Raw instant of the event.
    pub timestamp: String,
}

impl LocationEvent {
    pub fn new(country: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            user_id: String::new(),
            country: country.into(),
            departed_to: None,
            timestamp: timestamp.into(),
        }
    }

    pub fn with_user(self, user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), ..self }
    }

    pub fn with_departed_to(self, country: impl Into<String>) -> Self {
        Self { departed_to: Some(country.into()), ..self }
    }
}

/// An event whose timestamp has been resolved in the reference timezone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedEvent {
    pub country: String,
    pub departed_to: Option<String>,
    /// Wall-clock date time in the reference timezone.
    pub local: NaiveDateTime,
    /// Absolute instant of the event, used to order events of a same day.
    pub instant: DateTime<Utc>,
    /// Position of the event in the input log.
    pub index: usize,
}

impl DatedEvent {
    /// Calendar day of this event.
    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    /// Country the user stays in once this event's day is over.
    pub fn occupant(&self) -> &str {
        self.departed_to.as_deref().unwrap_or(&self.country)
    }
}

/// Lowercase and trim a country name.
///
/// ```
/// use residency_days::event::canonical_country;
///
/// assert_eq!(canonical_country("  Israel\n"), "israel");
/// ```
pub fn canonical_country(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parse a raw timestamp into a wall-clock date time of the reference
/// timezone.
///
/// Timestamps with an explicit offset are converted to the reference
/// timezone, timestamps without an offset are already assumed to be
/// expressed in it.
pub fn parse_timestamp<L: Localize>(raw: &str, locale: &L) -> Option<NaiveDateTime> {
    parse_instant(raw, locale).map(|(local, _)| local)
}

/// Parse a raw timestamp into both its wall-clock date time in the reference
/// timezone and its absolute instant.
fn parse_instant<L: Localize>(raw: &str, locale: &L) -> Option<(NaiveDateTime, DateTime<Utc>)> {
    let raw = raw.trim();

    let with_offset = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        OFFSET_FORMATS
            .into_iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    });

    if let Some(instant) = with_offset {
        let instant = instant.with_timezone(&Utc);
        return Some((locale.localize(instant), instant));
    }

    let local = LOCAL_FORMATS
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    Some((local, locale.instant(local)))
}

/// Resolve all events of a log, failing on the first malformed one.
pub fn resolve_events<L: Localize>(events: &[LocationEvent], locale: &L) -> Result<Vec<DatedEvent>> {
    let mut owner: Option<&str> = None;

    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            if !event.user_id.is_empty() {
                match owner {
                    None => owner = Some(event.user_id.as_str()),
                    Some(expected) if expected != event.user_id => {
                        return Err(Error::MixedUsers {
                            index,
                            expected: expected.to_string(),
                            found: event.user_id.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }

            let country = canonical_country(&event.country);

            if country.is_empty() {
                return Err(Error::MalformedEvent { index, reason: MalformedReason::EmptyCountry });
            }

            let (local, instant) = parse_instant(&event.timestamp, locale)
                .filter(|(local, _)| Year::of(local.date()).is_some())
                .ok_or_else(|| Error::MalformedEvent {
                    index,
                    reason: MalformedReason::Timestamp(event.timestamp.clone()),
                })?;

            let departed_to = event
                .departed_to
                .as_deref()
                .map(canonical_country)
                .filter(|name| !name.is_empty());

            Ok(DatedEvent { country, departed_to, local, instant, index })
        })
        .collect()
}

//! Development module that shares the fuzzing logic between unit tests and
//! the actual fuzzing.

use std::fmt::Debug;

use arbitrary::Arbitrary;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::event::{resolve_events, LocationEvent};
use crate::localization::NoLocation;
use crate::normalize::normalize;
use crate::policy::{AttributionPolicy, Origin};
use crate::year_filter::Year;
use crate::Context;

const COUNTRIES: [&str; 4] = ["israel", "vietnam", "thailand", "china"];
const HOME: &str = "israel";

/// Events are spread over this many days after the start of tracking.
const MAX_SPAN_DAYS: u16 = 3 * 366;

/// A single fuzzed location event.
#[derive(Arbitrary, Clone, Debug)]
pub struct RawEvent {
    pub country: u8,
    pub departed_to: Option<u8>,
    pub day: u16,
    pub minute: u16,
}

/// A fuzzing example
#[derive(Arbitrary, Clone)]
pub struct Data {
    pub events: Vec<RawEvent>,
    pub strict: bool,
    pub from_home: bool,
    pub baseline: u8,
    pub year_offset: Option<u8>,
}

impl Data {
    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 1, 1)
            .expect("invalid start date")
            .and_time(NaiveTime::MIN)
    }

    fn policy(&self) -> AttributionPolicy {
        if self.strict {
            AttributionPolicy::Strict
        } else {
            AttributionPolicy::BoundaryInclusive
        }
    }

    fn origin(&self) -> Origin {
        if self.from_home {
            Origin::Home
        } else {
            Origin::Unknown
        }
    }

    fn year(&self) -> Option<Year> {
        self.year_offset
            .and_then(|offset| Year::new(Self::start().year() - 1 + i32::from(offset % 6)).ok())
    }

    fn location_events(&self) -> Vec<LocationEvent> {
        self.events
            .iter()
            .map(|raw| {
                let country = COUNTRIES[usize::from(raw.country) % COUNTRIES.len()];

                let local = Self::start()
                    + TimeDelta::days(i64::from(raw.day % MAX_SPAN_DAYS))
                    + TimeDelta::minutes(i64::from(raw.minute % (24 * 60)));

                let event = LocationEvent::new(country, local.format("%Y-%m-%dT%H:%M").to_string());

                match raw.departed_to {
                    Some(dest) => {
                        event.with_departed_to(COUNTRIES[usize::from(dest) % COUNTRIES.len()])
                    }
                    None => event,
                }
            })
            .collect()
    }
}

impl Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Data");
        debug.field("policy", &self.policy());
        debug.field("origin", &self.origin());
        debug.field("baseline", &self.baseline);

        if let Some(year) = self.year() {
            debug.field("year", &year);
        }

        debug.field("events", &self.location_events());
        debug.finish()
    }
}

/// Run a fuzzing test and return `true` if the example should be kept in
/// corpus.
pub fn run_fuzz_compute(data: Data) -> bool {
    let events = data.location_events();

    if events.is_empty() {
        return false;
    }

    let ctx = Context::new(HOME)
        .expect("invalid home country")
        .with_policy(data.policy())
        .with_origin(data.origin());

    let resolved = resolve_events(&events, &NoLocation).expect("generated event is malformed");
    let normalized = normalize(resolved);
    assert_eq!(normalized, normalize(normalized.clone()));

    // Every day between first and last event belongs to exactly one country
    let calendar = ctx.attribute(&events).expect("could not attribute days");
    let first = normalized.first().map(|event| event.date()).expect("no event");
    let last = normalized.last().map(|event| event.date()).expect("no event");
    let span = (last - first).num_days() + 1;
    assert_eq!(i64::from(calendar.total_days()), span);

    for day in first.iter_days().take_while(|day| *day <= last) {
        assert!(calendar.owner_of(day).is_some(), "{day} is not attributed");
    }

    let baseline = u32::from(data.baseline);
    let year = data.year();
    let report = ctx.compute(&events, baseline, year).expect("could not compute report");
    let counted: u32 = report.iter().map(|entry| entry.day_count).sum();
    let listed: usize = report.iter().map(|entry| entry.dates.len()).sum();

    assert!(report.windows(2).all(|pair| pair[0].country < pair[1].country));
    assert!(counted == listed as u32 || counted == listed as u32 + baseline);

    match year {
        None => assert_eq!(listed as u32, calendar.total_days()),
        Some(year) => assert!(report
            .iter()
            .flat_map(|entry| entry.dates.iter())
            .all(|date| year.contains(*date))),
    }

    true
}

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;

use crate::event::{resolve_events, DatedEvent, LocationEvent};
use crate::gap::fill_gap;
use crate::localization::NoLocation;
use crate::normalize::normalize;
use crate::sweep::sweep;
use crate::{AttributedCalendar, AttributionPolicy, Context, Origin, Year};

const COUNTRIES: [&str; 4] = ["israel", "vietnam", "thailand", "china"];

fn arb_country() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COUNTRIES.to_vec())
}

fn arb_event() -> impl Strategy<Value = LocationEvent> {
    (arb_country(), prop::option::of(arb_country()), 0i64..800, 0i64..24 * 60).prop_map(
        |(country, dest, day, minute)| {
            let date = NaiveDate::from_ymd_opt(2013, 6, 1).unwrap() + TimeDelta::days(day);
            let local = date.and_hms_opt(0, 0, 0).unwrap() + TimeDelta::minutes(minute);
            let event = LocationEvent::new(country, local.format("%Y-%m-%d %H:%M").to_string());

            match dest {
                Some(dest) => event.with_departed_to(dest),
                None => event,
            }
        },
    )
}

fn arb_policy() -> impl Strategy<Value = AttributionPolicy> {
    prop_oneof![Just(AttributionPolicy::Strict), Just(AttributionPolicy::BoundaryInclusive)]
}

fn arb_origin() -> impl Strategy<Value = Origin> {
    prop_oneof![Just(Origin::Unknown), Just(Origin::Home)]
}

fn resolved(events: &[LocationEvent]) -> Vec<DatedEvent> {
    resolve_events(events, &NoLocation).unwrap()
}

proptest! {
    #[test]
    fn dedup_idempotent(events in prop::collection::vec(arb_event(), 0..60)) {
        let once = normalize(resolved(&events));
        let twice = normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn dedup_keeps_one_event_per_day(events in prop::collection::vec(arb_event(), 0..60)) {
        let normalized = normalize(resolved(&events));
        prop_assert!(normalized.windows(2).all(|pair| pair[0].date() < pair[1].date()));

        let mut days: Vec<_> = events.iter().map(|e| e.timestamp[..10].to_string()).collect();
        days.sort();
        days.dedup();
        prop_assert_eq!(normalized.len(), days.len());
    }

    #[test]
    fn no_day_is_attributed_twice(
        events in prop::collection::vec(arb_event(), 1..60),
        policy in arb_policy(),
        origin in arb_origin(),
    ) {
        let normalized = normalize(resolved(&events));
        let calendar = sweep(&normalized, policy, origin, "israel");

        let mut owners = BTreeMap::new();

        for (country, days) in calendar.iter() {
            for day in days.iter() {
                prop_assert!(owners.insert(day, country).is_none(), "{} attributed twice", day);
            }
        }

        // The calendar also has no hole between first and last event
        let first = normalized[0].date();
        let last = normalized[normalized.len() - 1].date();
        prop_assert_eq!(owners.len() as i64, (last - first).num_days() + 1);
    }

    #[test]
    fn day_count_matches_dates(
        events in prop::collection::vec(arb_event(), 0..60),
        policy in arb_policy(),
        baseline in 0u32..50,
        year in prop::option::of(2012i32..2017),
    ) {
        let ctx = Context::new("israel").unwrap().with_policy(policy);
        let year = year.map(|y| Year::new(y).unwrap());
        let report = ctx.compute(&events, baseline, year).unwrap();

        for entry in &report {
            if entry.country != "israel" {
                prop_assert_eq!(entry.day_count as usize, entry.dates.len());
            }

            prop_assert!(entry.day_count > 0);
            prop_assert!(entry.dates.windows(2).all(|pair| pair[0] < pair[1]));

            if let Some(year) = year {
                prop_assert!(entry.dates.iter().all(|date| year.contains(*date)));
            }
        }
    }

    #[test]
    fn gap_filling_is_monotonic(start in 0i64..2000, len in 0i64..400) {
        let prev = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap() + TimeDelta::days(start);
        let curr = prev + TimeDelta::days(len);
        let mut calendar = AttributedCalendar::new();
        let filled = fill_gap(&mut calendar, "vietnam", prev, curr);

        prop_assert_eq!(i64::from(filled), (len - 1).max(0));
        prop_assert_eq!(calendar.count("vietnam"), filled);
        prop_assert!(calendar.days("vietnam").map_or(true, |days| !days.contains(prev) && !days.contains(curr)));
    }

    #[test]
    fn yearly_reports_add_up(
        events in prop::collection::vec(arb_event(), 1..60),
        policy in arb_policy(),
    ) {
        let ctx = Context::new("israel").unwrap().with_policy(policy);
        let all_time = ctx.compute(&events, 0, None).unwrap();

        for country in COUNTRIES {
            let per_year: u32 = (2013..=2015)
                .map(|y| ctx.compute(&events, 0, Some(Year::new(y).unwrap())).unwrap().days_in(country))
                .sum();

            prop_assert_eq!(per_year, all_time.days_in(country));
        }
    }
}

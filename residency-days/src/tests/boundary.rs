use crate::error::Error;
use crate::policy::{Boundary, Origin};
use crate::{date, event, report, AttributionPolicy, Context};

#[test]
fn tie_break_between_home_and_abroad() {
    let leaving = Boundary { departing: Some("israel"), arriving: "china", home: "israel" };
    let returning = Boundary { departing: Some("china"), arriving: "israel", home: "israel" };

    assert_eq!(AttributionPolicy::BoundaryInclusive.owner(&leaving), "israel");
    assert_eq!(AttributionPolicy::BoundaryInclusive.owner(&returning), "israel");
    assert_eq!(AttributionPolicy::Strict.owner(&leaving), "china");
    assert_eq!(AttributionPolicy::Strict.owner(&returning), "israel");
}

#[test]
fn tie_break_abroad_only() {
    let crossing = Boundary { departing: Some("vietnam"), arriving: "thailand", home: "israel" };
    let unknown = Boundary { departing: None, arriving: "thailand", home: "israel" };

    for policy in [AttributionPolicy::Strict, AttributionPolicy::BoundaryInclusive] {
        assert_eq!(policy.owner(&crossing), "thailand");
        assert_eq!(policy.owner(&unknown), "thailand");
    }
}

#[test]
fn round_trip_from_home() -> Result<(), Error> {
    let events = [
        event!("israel", "2014-03-01T09:00"),
        event!("china", "2014-03-05T21:00"),
        event!("israel", "2014-03-10T07:30"),
    ];

    let strict = report!(events, home = "israel", policy = AttributionPolicy::Strict);
    assert_eq!(strict.days_in("israel"), 5);
    assert_eq!(strict.days_in("china"), 5);

    let inclusive = report!(events, home = "israel", policy = AttributionPolicy::BoundaryInclusive);
    assert_eq!(inclusive.days_in("israel"), 6);
    assert_eq!(inclusive.days_in("china"), 4);
    assert_eq!(inclusive.get("china").unwrap().dates[0], date!("2014-03-06"));
    Ok(())
}

#[test]
fn departure_country_is_occupied_until_next_event() -> Result<(), Error> {
    let events = [
        event!("israel", "2014-03-01", departed_to = "thailand"),
        event!("thailand", "2014-03-10", departed_to = "israel"),
        event!("israel", "2014-03-15"),
    ];

    for policy in [AttributionPolicy::Strict, AttributionPolicy::BoundaryInclusive] {
        let report = report!(events, home = "israel", policy = policy);
        assert_eq!(report.days_in("thailand"), 9, "{policy}");
        assert_eq!(report.days_in("israel"), 6, "{policy}");
        assert_eq!(report.get("thailand").unwrap().dates[0], date!("2014-03-02"));
    }

    Ok(())
}

#[test]
fn recorded_departure_moves_the_boundary() -> Result<(), Error> {
    let events = [
        event!("israel", "2014-03-01", departed_to = "thailand"),
        event!("thailand", "2014-03-03"),
    ];

    // The departure is already recorded on the home event, so the arrival day
    // is not a departure from home anymore.
    let inclusive = report!(events, home = "israel");
    assert_eq!(inclusive.days_in("israel"), 1);
    assert_eq!(inclusive.days_in("thailand"), 2);

    let ctx = Context::new("israel")?.with_origin(Origin::Home);
    let from_home = ctx.compute(&[event!("thailand", "2014-03-03")], 0, None)?;
    assert_eq!(from_home.days_in("israel"), 1);
    assert_eq!(from_home.days_in("thailand"), 0);
    Ok(())
}

#[test]
fn policies_only_move_boundary_days() -> Result<(), Error> {
    let events = [
        event!("israel", "2014-01-01"),
        event!("vietnam", "2014-02-01"),
        event!("thailand", "2014-02-15"),
        event!("israel", "2014-03-01"),
        event!("china", "2014-04-01"),
    ];

    let strict = report!(events, home = "israel", policy = AttributionPolicy::Strict);
    let inclusive = report!(events, home = "israel", policy = AttributionPolicy::BoundaryInclusive);

    let total = |report: &crate::Report| -> u32 { report.iter().map(|e| e.day_count).sum() };
    assert_eq!(total(&strict), total(&inclusive));
    assert_eq!(total(&strict), 91);

    // Two departures from home
    assert_eq!(inclusive.days_in("israel"), strict.days_in("israel") + 2);
    assert_eq!(inclusive.days_in("vietnam") + 1, strict.days_in("vietnam"));
    assert_eq!(inclusive.days_in("china") + 1, strict.days_in("china"));
    assert_eq!(inclusive.days_in("thailand"), strict.days_in("thailand"));
    Ok(())
}

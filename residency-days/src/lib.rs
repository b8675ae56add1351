#![doc = include_str!("../../README.md")]

pub mod aggregate;
pub mod calendar;
pub mod context;
pub mod error;
pub mod event;
pub mod gap;
pub mod localization;
pub mod normalize;
pub mod policy;
pub mod sweep;
pub mod year_filter;

#[cfg(any(test, feature = "fuzzing"))]
pub mod fuzzing;

#[cfg(test)]
mod tests;

// Public re-exports
pub use crate::aggregate::{CountryDays, Report};
pub use crate::calendar::AttributedCalendar;
pub use crate::context::Context;
pub use crate::error::{Error, Result};
pub use crate::event::LocationEvent;
pub use crate::policy::{AttributionPolicy, Origin};
pub use crate::year_filter::Year;

/// Count days spent per country from a location log, with reference
/// timezone set to UTC.
///
/// This is a shortcut for [`Context::compute`], see [`Context`] for more
/// settings. The first logged day always goes to the first logged country
/// here ([`Origin::Unknown`]), use [`Context::with_origin`] if tracking
/// starts by leaving the home country:
///
/// ```
/// use residency_days::{compute, AttributionPolicy, Context, LocationEvent, Origin};
///
/// let events = [
///     LocationEvent::new("vietnam", "2014-01-01T06:00:00"),
///     LocationEvent::new("israel", "2014-01-04T06:00:00"),
/// ];
///
/// let policy = AttributionPolicy::BoundaryInclusive;
/// let report = compute(&events, "israel", 0, policy, None).unwrap();
/// assert_eq!(report.days_in("vietnam"), 3);
///
/// let ctx = Context::new("israel").unwrap().with_origin(Origin::Home);
/// let report = ctx.compute(&events, 0, None).unwrap();
/// assert_eq!(report.days_in("vietnam"), 2);
/// assert_eq!(report.days_in("israel"), 2);
/// ```
pub fn compute(
    events: &[LocationEvent],
    home: &str,
    baseline: u32,
    policy: AttributionPolicy,
    year: Option<Year>,
) -> Result<Report> {
    Context::new(home)?
        .with_policy(policy)
        .compute(events, baseline, year)
}

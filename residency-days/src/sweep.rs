use crate::calendar::AttributedCalendar;
use crate::event::DatedEvent;
use crate::gap::fill_gap;
use crate::policy::{AttributionPolicy, Boundary, Origin};

/// Build the day-by-day calendar of a normalized event log.
///
/// Each event owns its own day following the attribution policy, and the
/// unlogged days that follow it are attributed to the country the user stays
/// in after this event: the event's departure country if there is one, its
/// own country otherwise.
///
/// Input events must be sorted with at most one event per day (see
/// [`crate::normalize::normalize`]), which ensures that no day is attributed
/// to two countries.
pub fn sweep(
    events: &[DatedEvent],
    policy: AttributionPolicy,
    origin: Origin,
    home: &str,
) -> AttributedCalendar {
    let mut calendar = AttributedCalendar::new();

    let Some((first, rest)) = events.split_first() else {
        return calendar;
    };

    let first_boundary = Boundary {
        departing: origin.departing(home),
        arriving: &first.country,
        home,
    };

    calendar.attribute(policy.owner(&first_boundary), first.date());
    let mut prev = first;

    #[cfg(feature = "log")]
    let mut filled = 0;

    for curr in rest {
        debug_assert!(prev.date() < curr.date(), "events are not normalized");
        let occupant = prev.occupant();

        #[cfg_attr(not(feature = "log"), allow(unused_variables))]
        let gap = fill_gap(&mut calendar, occupant, prev.date(), curr.date());

        let boundary = Boundary {
            departing: Some(occupant),
            arriving: &curr.country,
            home,
        };

        let owner = policy.owner(&boundary);
        calendar.attribute(owner, curr.date());

        #[cfg(feature = "log")]
        {
            filled += gap;
            log::trace!(
                departing = occupant,
                arriving = curr.country.as_str(),
                owner = owner,
                gap = gap;
                "boundary day {}",
                curr.date(),
            );
        }

        prev = curr;
    }

    #[cfg(feature = "log")]
    log::debug!(events = events.len(), filled = filled; "swept location log");

    calendar
}

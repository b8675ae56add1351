use crate::event::DatedEvent;

/// Sort events chronologically and keep a single event per calendar day.
///
/// Events are grouped by their day in the reference timezone and ordered by
/// absolute instant within a day, which differs from wall-clock order when
/// clocks are set back. When several events fall on the same day, the latest
/// one is kept: it is the one most likely to carry a complete record of the
/// day (a departure country for instance). Events logged at the exact same
/// instant keep their input order, so the last one of the input wins.
pub fn normalize(mut events: Vec<DatedEvent>) -> Vec<DatedEvent> {
    events.sort_by_key(|event| (event.date(), event.instant));
    let mut res: Vec<DatedEvent> = Vec::with_capacity(events.len());

    for event in events {
        match res.last_mut() {
            Some(last) if last.date() == event.date() => *last = event,
            _ => res.push(event),
        }
    }

    res
}

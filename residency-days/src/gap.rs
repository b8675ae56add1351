use chrono::NaiveDate;

use crate::calendar::AttributedCalendar;

/// Days strictly between two dates.
///
/// ```
/// use chrono::NaiveDate;
/// use residency_days::gap::gap_days;
///
/// let jan = |d| NaiveDate::from_ymd_opt(2014, 1, d).unwrap();
/// assert_eq!(gap_days(jan(1), jan(4)).collect::<Vec<_>>(), [jan(2), jan(3)]);
/// assert_eq!(gap_days(jan(1), jan(2)).count(), 0);
/// assert_eq!(gap_days(jan(4), jan(1)).count(), 0);
/// ```
pub fn gap_days(prev: NaiveDate, curr: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    prev.iter_days().skip(1).take_while(move |day| *day < curr)
}

/// Attribute unlogged days between two consecutive events to the country the
/// user stayed in, returns the number of attributed days.
pub fn fill_gap(
    calendar: &mut AttributedCalendar,
    occupant: &str,
    prev: NaiveDate,
    curr: NaiveDate,
) -> u32 {
    let mut count = 0;

    for day in gap_days(prev, curr) {
        calendar.attribute(occupant, day);
        count += 1;
    }

    count
}

#[cfg(test)]
mod test {
    use super::{fill_gap, gap_days};
    use crate::calendar::AttributedCalendar;
    use crate::date;

    #[test]
    fn gap_over_year_end() {
        let days: Vec<_> = gap_days(date!("2013-12-30"), date!("2014-01-02")).collect();
        assert_eq!(days, [date!("2013-12-31"), date!("2014-01-01")]);
    }

    #[test]
    fn gap_over_leap_day() {
        assert_eq!(gap_days(date!("2012-02-28"), date!("2012-03-01")).count(), 1);
        assert_eq!(gap_days(date!("2013-02-28"), date!("2013-03-01")).count(), 0);
    }

    #[test]
    fn fill_excludes_both_ends() {
        let mut calendar = AttributedCalendar::new();
        let count = fill_gap(&mut calendar, "china", date!("2014-01-04"), date!("2014-01-11"));
        assert_eq!(count, 6);
        assert!(calendar.owner_of(date!("2014-01-04")).is_none());
        assert!(calendar.owner_of(date!("2014-01-11")).is_none());
        assert_eq!(calendar.owner_of(date!("2014-01-05")), Some("china"));
        assert_eq!(calendar.owner_of(date!("2014-01-10")), Some("china"));
    }
}

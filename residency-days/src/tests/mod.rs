mod boundary;
mod fuzzing;
mod properties;

#[macro_export]
macro_rules! date {
    ( $date: expr ) => {{
        use chrono::NaiveDate;
        NaiveDate::parse_from_str($date, "%Y-%m-%d").expect("invalid date literal")
    }};
}

#[macro_export]
macro_rules! datetime {
    ( $date: expr ) => {{
        use chrono::NaiveDateTime;
        NaiveDateTime::parse_from_str($date, "%Y-%m-%d %H:%M").expect("invalid datetime literal")
    }};
    ( $date: expr, $tz: expr ) => {{
        use chrono::TimeZone;

        $tz.from_local_datetime(&datetime!($date))
            .single()
            .expect("ambiguous input datetime")
    }};
}

#[macro_export]
macro_rules! event {
    ( $country: expr, $timestamp: expr $( , departed_to = $dest: expr )? $( , )? ) => {{
        $crate::LocationEvent::new($country, $timestamp) $( .with_departed_to($dest) )?
    }};
}

#[macro_export]
macro_rules! report {
    (
        $events: expr,
        home = $home: expr
        $( , policy = $policy: expr )?
        $( , baseline = $baseline: expr )?
        $( , year = $year: expr )?
        $( , )?
    ) => {{
        use $crate::{Context, Year};

        let ctx = Context::new($home)? $( .with_policy($policy) )?;
        let baseline = 0 $( + $baseline )?;
        let year: Option<Year> = None $( .or(Some($year.parse()?)) )?;
        ctx.compute(&$events, baseline, year)?
    }};
}

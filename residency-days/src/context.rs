use crate::aggregate::{aggregate, Report};
use crate::calendar::AttributedCalendar;
use crate::error::{Error, Result};
use crate::event::{canonical_country, resolve_events, LocationEvent};
use crate::localization::{Localize, NoLocation};
use crate::normalize::normalize;
use crate::policy::{AttributionPolicy, Origin};
use crate::sweep::sweep;
use crate::year_filter::{filter_year, Year};

/// All the settings that can alter how a location log is turned into days
/// per country.
///
/// ```
/// use chrono::FixedOffset;
/// use residency_days::localization::TzLocation;
/// use residency_days::{AttributionPolicy, Context, LocationEvent};
///
/// let ctx = Context::new("Israel")
///     .unwrap()
///     .with_policy(AttributionPolicy::Strict)
///     .with_locale(TzLocation::new(FixedOffset::east_opt(2 * 3600).unwrap()));
///
/// let events = [
///     LocationEvent::new("israel", "2014-03-01T23:30:00Z"),
///     LocationEvent::new("china", "2014-03-05T10:00:00Z"),
/// ];
///
/// // The first event already happens on March 2nd in the reference timezone.
/// let report = ctx.compute(&events, 0, None).unwrap();
/// assert_eq!(report.days_in("israel"), 3);
/// assert_eq!(report.days_in("china"), 1);
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Context<L = NoLocation> {
    home: String,
    pub policy: AttributionPolicy,
    pub origin: Origin,
    pub locale: L,
}

impl Context<NoLocation> {
    /// Create a context for given home country, with default settings.
    pub fn new(home: &str) -> Result<Self> {
        let home = canonical_country(home);

        if home.is_empty() {
            return Err(Error::EmptyHomeCountry);
        }

        Ok(Self {
            home,
            policy: AttributionPolicy::default(),
            origin: Origin::default(),
            locale: NoLocation,
        })
    }
}

impl<L> Context<L> {
    /// Attach a new attribution policy to this context.
    pub fn with_policy(self, policy: AttributionPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Attach a new origin to this context.
    pub fn with_origin(self, origin: Origin) -> Self {
        Self { origin, ..self }
    }

    /// Attach a new locale component to this context.
    pub fn with_locale<L2: Localize>(self, locale: L2) -> Context<L2> {
        Context {
            home: self.home,
            policy: self.policy,
            origin: self.origin,
            locale,
        }
    }

    /// Get the canonical name of the home country.
    pub fn home(&self) -> &str {
        &self.home
    }
}

impl<L: Localize> Context<L> {
    /// Build the full day-by-day calendar of a location log.
    pub fn attribute(&self, events: &[LocationEvent]) -> Result<AttributedCalendar> {
        let resolved = resolve_events(events, &self.locale)?;

        #[cfg(feature = "log")]
        let raw_len = resolved.len();

        let normalized = normalize(resolved);

        #[cfg(feature = "log")]
        log::debug!(
            raw = raw_len,
            kept = normalized.len(),
            policy = self.policy.as_str();
            "normalized location log",
        );

        Ok(sweep(&normalized, self.policy, self.origin, &self.home))
    }

    /// Count days spent per country, optionally restricted to a single year.
    ///
    /// The `baseline` is a number of days spent at home before tracking
    /// started. It is only counted in the year of the first tracked day at
    /// home.
    pub fn compute(
        &self,
        events: &[LocationEvent],
        baseline: u32,
        year: Option<Year>,
    ) -> Result<Report> {
        let calendar = self.attribute(events)?;
        let filtered = filter_year(calendar, year, &self.home, baseline);

        #[cfg(feature = "log")]
        if filtered.baseline != baseline {
            log::debug!(
                baseline = baseline;
                "baseline is not counted in {}",
                filtered.year.map(|y| y.to_string()).unwrap_or_default(),
            );
        }

        Ok(aggregate(filtered, &self.home))
    }
}

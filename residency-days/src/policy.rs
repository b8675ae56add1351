use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A change of country on a given day.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Boundary<'a> {
    /// Country the user was staying in before this day, if known.
    pub departing: Option<&'a str>,
    /// Country recorded on this day.
    pub arriving: &'a str,
    /// The designated home country.
    pub home: &'a str,
}

impl Boundary<'_> {
    pub fn departs_from_home(&self) -> bool {
        self.departing == Some(self.home)
    }

    pub fn arrives_home(&self) -> bool {
        self.arriving == self.home
    }
}

/// Decide which country owns a boundary day.
///
/// ```
/// use residency_days::policy::{AttributionPolicy, Boundary};
///
/// let leaving_home = Boundary { departing: Some("israel"), arriving: "vietnam", home: "israel" };
/// assert_eq!(AttributionPolicy::Strict.owner(&leaving_home), "vietnam");
/// assert_eq!(AttributionPolicy::BoundaryInclusive.owner(&leaving_home), "israel");
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionPolicy {
    /// Only full days spent in a country count: the crossing day belongs to
    /// the destination.
    #[serde(alias = "regular")]
    Strict,
    /// Both the day of departure from home and the day of return are counted
    /// as days at home.
    #[default]
    #[serde(alias = "ita")]
    BoundaryInclusive,
}

impl AttributionPolicy {
    /// Get the country owning the day of given boundary.
    pub fn owner<'a>(self, boundary: &Boundary<'a>) -> &'a str {
        match self {
            Self::Strict => boundary.arriving,
            Self::BoundaryInclusive if boundary.departs_from_home() => boundary.home,
            Self::BoundaryInclusive => boundary.arriving,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::BoundaryInclusive => "boundary-inclusive",
        }
    }
}

impl FromStr for AttributionPolicy {
    type Err = Error;

    /// ```
    /// use residency_days::policy::AttributionPolicy;
    ///
    /// assert_eq!("ITA".parse::<AttributionPolicy>(), Ok(AttributionPolicy::BoundaryInclusive));
    /// assert_eq!(" regular ".parse::<AttributionPolicy>(), Ok(AttributionPolicy::Strict));
    /// assert!("lenient".parse::<AttributionPolicy>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "regular" => Ok(Self::Strict),
            "boundary-inclusive" | "ita" => Ok(Self::BoundaryInclusive),
            _ => Err(Error::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for AttributionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the user is assumed to come from before the first logged event.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Nothing is known: the first day goes to the first logged country.
    #[default]
    Unknown,
    /// Tracking starts by leaving the home country, the first day is a
    /// regular boundary day departing from home.
    Home,
}

impl Origin {
    pub(crate) fn departing(self, home: &str) -> Option<&str> {
        match self {
            Self::Unknown => None,
            Self::Home => Some(home),
        }
    }
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "home" => Ok(Self::Home),
            _ => Err(Error::InvalidOrigin(s.to_string())),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Home => write!(f, "home"),
        }
    }
}

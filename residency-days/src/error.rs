use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can prevent a residency computation from completing.
///
/// Errors are raised before any output is built, a failed computation never
/// yields partial day counts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown attribution policy `{0}`: expected `strict` or `boundary-inclusive`")]
    InvalidPolicy(String),
    #[error("invalid year `{0}`: expected a 4-digit year")]
    InvalidYear(String),
    #[error("invalid origin `{0}`: expected `unknown` or `home`")]
    InvalidOrigin(String),
    #[error("malformed event #{index}: {reason}")]
    MalformedEvent { index: usize, reason: MalformedReason },
    #[error("event #{index} belongs to user `{found}` while the log belongs to `{expected}`")]
    MixedUsers {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("home country cannot be blank")]
    EmptyHomeCountry,
}

/// Why a single location event was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    EmptyCountry,
    Timestamp(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCountry => write!(f, "country name cannot be blank"),
            Self::Timestamp(raw) => write!(f, "`{raw}` is not a date time"),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Storable classification of an entry.
///
/// The set is closed: a stored entry is always a comment or a question.
/// The "match anything" wildcard used by list queries is deliberately not a
/// member of this enum; see [`KindFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "c")]
    Comment,
    #[serde(rename = "q")]
    Question,
}

impl Kind {
    /// Single-character wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Comment => "c",
            Self::Question => "q",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Kind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, TypeError> {
        match s {
            "c" => Ok(Self::Comment),
            "q" => Ok(Self::Question),
            other => Err(TypeError::InvalidKind(other.to_string())),
        }
    }
}

/// Kind constraint applied by list queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KindFilter {
    /// Match entries of any kind.
    #[default]
    Any,
    /// Match only entries of the given kind.
    Only(Kind),
}

impl KindFilter {
    /// Parse a query-string value.
    ///
    /// Absent, blank, and unrecognized values all mean "no constraint".
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.parse().ok())
            .map(Self::Only)
            .unwrap_or(Self::Any)
    }

    /// Returns `true` if an entry of `kind` satisfies this filter.
    pub fn matches(&self, kind: Kind) -> bool {
        match self {
            Self::Any => true,
            Self::Only(k) => *k == kind,
        }
    }
}

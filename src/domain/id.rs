//! Integer row identifiers with distinct types per table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone)]
pub struct ParseIdError {
    value: String,
    reason: String,
}

impl ParseIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

fn parse_id(s: &str) -> Result<i64, ParseIdError> {
    s.trim()
        .parse::<i64>()
        .map_err(|e: ParseIntError| ParseIdError {
            value: s.to_string(),
            reason: e.to_string(),
        })
}

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw row id.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw row id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_id(s).map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

row_id!(
    /// Identifies a page row. Stable across the phantom→real transition.
    PageId
);

row_id!(
    /// Identifies one immutable revision.
    RevisionId
);

row_id!(
    /// Identifies an author. Supplied by the caller's identity context.
    UserId
);

row_id!(
    /// Identifies a comment on a page.
    CommentId
);

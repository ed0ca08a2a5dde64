mod compare;

#[cfg(test)]
mod tests;

use crate::types::Timestamp;

// re-exports
pub use compare::order_cmp;

///
/// Value
///
/// The field model every record surfaces for search, filtering, and sorting.
/// Deliberately small: back-office fields are text, ranked enums, dates, and
/// the occasional flag or count. Absent optional fields surface as `Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Uint(u64),
    Rank(u8),
    Timestamp(Timestamp),
    Text(String),
}

impl Value {
    /// Construct a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Canonical variant rank; mixed-variant comparisons order by this alone.
    /// `Null` ranks last so absent fields sort after present ones ascending.
    #[must_use]
    pub const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Uint(_) => 1,
            Self::Rank(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Text(_) => 4,
            Self::Null => 5,
        }
    }

    /// The text payload as seen by full-text search; non-text values are
    /// invisible to search.
    #[must_use]
    pub fn as_search_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Uint(n)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Self::Timestamp(t)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

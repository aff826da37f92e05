//! Row budget primitives.
//!
//! The store may hold at most `row_limit` rows across both tables, minus
//! [`RESERVED_ROWS`] for the migration bookkeeping row that lives outside them.

use std::str::FromStr;

/// Rows permanently set aside for the migration bookkeeping table.
pub const RESERVED_ROWS: i64 = 1;

/// Validation errors for [`RowLimit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowLimitError {
    /// The value is not an integer.
    #[error("row limit must be an integer, got '{0}'")]
    NotAnInteger(String),
    /// The value is a negative integer.
    #[error("row limit must not be negative, got {0}")]
    Negative(i64),
}

/// Configured maximum number of rows in the store.
///
/// # Examples
/// ```
/// use find_my_bike::domain::RowLimit;
///
/// let limit: RowLimit = "1000".parse().expect("valid limit");
/// assert_eq!(limit.get(), 1000);
/// assert!("-1".parse::<RowLimit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimit(i64);

impl RowLimit {
    /// Validate a raw limit.
    ///
    /// # Errors
    /// Returns [`RowLimitError::Negative`] for values below zero.
    pub fn new(limit: i64) -> Result<Self, RowLimitError> {
        if limit < 0 {
            return Err(RowLimitError::Negative(limit));
        }
        Ok(Self(limit))
    }

    /// The limit as a signed row count.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for RowLimit {
    type Err = RowLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let limit = s
            .trim()
            .parse::<i64>()
            .map_err(|_| RowLimitError::NotAnInteger(s.to_owned()))?;
        Self::new(limit)
    }
}

/// Row counts of both tables, read together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub postings: i64,
    pub corrections: i64,
}

impl RowCounts {
    /// Rows consumed, including the reserved bookkeeping row.
    #[must_use]
    pub const fn used(self) -> i64 {
        self.postings + self.corrections + RESERVED_ROWS
    }

    /// Rows that may still be added under `limit`; negative when over budget.
    ///
    /// # Examples
    /// ```
    /// use find_my_bike::domain::{RowCounts, RowLimit};
    ///
    /// let counts = RowCounts { postings: 10, corrections: 1 };
    /// let limit = RowLimit::new(1000).expect("valid limit");
    /// assert_eq!(counts.free_under(limit), 988);
    /// ```
    #[must_use]
    pub const fn free_under(self, limit: RowLimit) -> i64 {
        limit.get() - self.used()
    }
}

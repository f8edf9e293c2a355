//! Expense identifiers
//!
//! Expense IDs are creation timestamps in milliseconds. The newtype keeps
//! them from being mixed up with amounts or page numbers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique, monotonically increasing expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Wrap a raw identifier
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Allocate the next identifier from the wall clock
    ///
    /// Falls back to `latest + 1` when the clock has not advanced past the
    /// newest existing identifier, so two creations within the same
    /// millisecond never collide. `None` once `latest` is `i64::MAX`.
    pub fn next(latest: Option<ExpenseId>) -> Option<Self> {
        Self::next_at(Utc::now().timestamp_millis(), latest)
    }

    /// Allocate the next identifier given an explicit clock reading
    pub fn next_at(now_ms: i64, latest: Option<ExpenseId>) -> Option<Self> {
        match latest {
            Some(ExpenseId(last)) if last >= now_ms => last.checked_add(1).map(Self),
            _ => Some(Self(now_ms)),
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Billing period (month + year)

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// A monthly billing period
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    /// Year (e.g. 2025)
    pub year: i32,

    /// Month, 1-12
    pub month: u32,
}

impl Period {
    /// Creates a period, rejecting months outside 1-12 and years before 1
    pub fn new(month: u32, year: i32) -> LedgerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::validation(
                "month",
                format!("month must be between 1 and 12, got {}", month),
            ));
        }
        if year < 1 {
            return Err(LedgerError::validation(
                "year",
                format!("year must be positive, got {}", year),
            ));
        }
        Ok(Self { year, month })
    }

    /// The period containing today's date (UTC)
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The period immediately before this one
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Resolves optional query values, falling back to the current period
    ///
    /// Supplying only one of month/year fills the other from today's date.
    pub fn resolve(month: Option<u32>, year: Option<i32>) -> LedgerResult<Self> {
        let current = Self::current();
        Self::new(month.unwrap_or(current.month), year.unwrap_or(current.year))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

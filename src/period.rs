// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar months and the periods transactions are selected by.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// A (year, month) pair. Ordering is chronological, which is what the
/// monthly series relies on; the display label is not sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> FinanceResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::InvalidPeriod(format!(
                "month number {} out of range",
                month
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(FinanceError::InvalidPeriod(format!("year {} out of range", year)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let next = self.next().first_day();
        next.pred_opt().unwrap_or(next)
    }

    pub fn prev(&self) -> Self {
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

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Short chart label, e.g. `Jan/24`.
    pub fn label(&self) -> String {
        self.first_day().format("%b/%y").to_string()
    }

    /// Long heading, e.g. `January 2024`.
    pub fn long_label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FinanceError::InvalidPeriod(format!("'{}', expected YYYY-MM", s));
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// The date range a view selects before aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Period {
    Month(YearMonth),
    Year(i32),
    Range { from: NaiveDate, to: NaiveDate },
}

impl Period {
    pub fn current_month(today: NaiveDate) -> Self {
        Period::Month(YearMonth::from_date(today))
    }

    pub fn year(year: i32) -> FinanceResult<Self> {
        YearMonth::new(year, 1)?;
        Ok(Period::Year(year))
    }

    pub fn range(from: NaiveDate, to: NaiveDate) -> FinanceResult<Self> {
        if from > to {
            return Err(FinanceError::InvalidPeriod(format!(
                "start {} is after end {}",
                from, to
            )));
        }
        Ok(Period::Range { from, to })
    }

    /// Lower bound for open-ended ranges. Kept to four-digit years so stored
    /// `YYYY-MM-DD` text still compares correctly.
    pub fn earliest() -> NaiveDate {
        NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn latest() -> NaiveDate {
        NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
    }

    /// Inclusive start and end dates.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Period::Month(ym) => (ym.first_day(), ym.last_day()),
            Period::Year(y) => (
                YearMonth { year: y, month: 1 }.first_day(),
                YearMonth { year: y, month: 12 }.last_day(),
            ),
            Period::Range { from, to } => (from, to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (start, end) = self.bounds();
        start <= date && date <= end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month(ym) => f.write_str(&ym.long_label()),
            Period::Year(y) => write!(f, "{}", y),
            Period::Range { from, to } => write!(f, "{} .. {}", from, to),
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation of an already-selected set of transactions into the totals,
//! category breakdowns and monthly series the dashboard and reports show.
//!
//! Everything here is pure: the same input always yields structurally equal
//! output, and nothing is cached between calls. Sums use [`Decimal`] so
//! that many small amounts do not accumulate rounding error.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionType};
use crate::period::YearMonth;

/// Grouping key for transactions with no category label.
pub const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`, may be negative.
    pub balance: Decimal,
}

impl PeriodSummary {
    fn add(&mut self, kind: TransactionType, amount: Decimal) {
        match kind {
            TransactionType::Income => self.total_income += amount,
            TransactionType::Expense => self.total_expense += amount,
        }
        self.balance = self.total_income - self.total_expense;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    pub month: YearMonth,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl CategoryTotals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// The label a transaction is grouped under, exactly as given. Empty or
/// blank names count as missing.
pub fn category_key(t: &Transaction) -> &str {
    match t.category_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNCATEGORIZED,
    }
}

pub fn compute_totals(transactions: &[Transaction]) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    for t in transactions {
        summary.add(t.kind, t.amount);
    }
    summary
}

/// Sums amounts per category name, optionally keeping only one side.
pub fn breakdown_by_category(
    transactions: &[Transaction],
    type_filter: Option<TransactionType>,
) -> HashMap<String, Decimal> {
    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for t in transactions
        .iter()
        .filter(|t| type_filter.is_none_or(|kind| t.kind == kind))
    {
        *agg.entry(category_key(t).to_string())
            .or_insert(Decimal::ZERO) += t.amount;
    }
    agg
}

/// One entry per month that has at least one transaction, oldest first.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyEntry> {
    let mut months: BTreeMap<YearMonth, PeriodSummary> = BTreeMap::new();
    for t in transactions {
        months
            .entry(YearMonth::from_date(t.date))
            .or_default()
            .add(t.kind, t.amount);
    }
    tracing::debug!(
        months = months.len(),
        transactions = transactions.len(),
        "built monthly series"
    );
    months
        .into_iter()
        .map(|(month, s)| MonthlyEntry {
            month,
            label: month.label(),
            income: s.total_income,
            expense: s.total_expense,
            balance: s.balance,
        })
        .collect()
}

/// Income and expense per category name. A category can carry amounts on
/// both sides when upstream data mixes types.
pub fn category_totals(transactions: &[Transaction]) -> HashMap<String, CategoryTotals> {
    let mut agg: HashMap<String, CategoryTotals> = HashMap::new();
    for t in transactions {
        let entry = agg.entry(category_key(t).to_string()).or_default();
        match t.kind {
            TransactionType::Income => entry.income += t.amount,
            TransactionType::Expense => entry.expense += t.amount,
        }
    }
    agg
}

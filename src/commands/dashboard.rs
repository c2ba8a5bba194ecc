// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-month overview: summary cards, spending by category, latest entries.

use std::collections::HashMap;
use std::fmt::Write;

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{breakdown_by_category, compute_totals, PeriodSummary};
use crate::commands::transactions::{ledger_row, LEDGER_HEADERS};
use crate::db::{load_transactions, TransactionFilter};
use crate::models::{Transaction, TransactionType};
use crate::period::{Period, YearMonth};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_month, pretty_table, today};

/// Colours assigned to chart slices, cycled by index.
pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: Decimal,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub month: YearMonth,
    pub title: String,
    pub prev: YearMonth,
    pub next: YearMonth,
    pub currency: String,
    pub summary: PeriodSummary,
    pub expense_slices: Vec<ChartSlice>,
    pub recent: Vec<Transaction>,
}

/// Largest slice first; ties broken by name so colours are stable.
pub fn chart_slices(breakdown: HashMap<String, Decimal>) -> Vec<ChartSlice> {
    let mut items: Vec<_> = breakdown.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| ChartSlice {
            name,
            value,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

/// `transactions` is the month's set, newest first, as the store returns it.
pub fn build_view(month: YearMonth, transactions: &[Transaction], currency: &str) -> DashboardView {
    DashboardView {
        month,
        title: month.long_label(),
        prev: month.prev(),
        next: month.next(),
        currency: currency.to_string(),
        summary: compute_totals(transactions),
        expense_slices: chart_slices(breakdown_by_category(
            transactions,
            Some(TransactionType::Expense),
        )),
        recent: transactions.iter().take(RECENT_LIMIT).cloned().collect(),
    }
}

pub fn render(view: &DashboardView) -> String {
    let ccy = &view.currency;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dashboard: {}   (prev: {}, next: {})",
        view.title, view.prev, view.next
    );

    let marker = if view.summary.balance >= Decimal::ZERO {
        "ok"
    } else {
        "negative"
    };
    let cards = pretty_table(
        &["Income", "Expense", "Balance"],
        vec![vec![
            fmt_money(&view.summary.total_income, ccy),
            fmt_money(&view.summary.total_expense, ccy),
            format!("{} ({})", fmt_money(&view.summary.balance, ccy), marker),
        ]],
    );
    let _ = writeln!(out, "{}", cards);

    if view.recent.is_empty() {
        let _ = writeln!(out, "No transactions in this period");
        return out;
    }

    if !view.expense_slices.is_empty() {
        let rows = view
            .expense_slices
            .iter()
            .map(|s| vec![s.name.clone(), fmt_money(&s.value, ccy), s.color.to_string()])
            .collect();
        let _ = writeln!(out, "Expenses by category");
        let _ = writeln!(out, "{}", pretty_table(&["Category", "Spent", "Colour"], rows));
    }

    let rows = view.recent.iter().map(|t| ledger_row(t, ccy)).collect();
    let _ = writeln!(out, "Latest transactions");
    let _ = writeln!(out, "{}", pretty_table(&LEDGER_HEADERS, rows));
    out
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => YearMonth::from_date(today()),
    };
    let transactions =
        load_transactions(conn, &TransactionFilter::for_period(Period::Month(month)))?;
    let view = build_view(month, &transactions, &get_currency(conn)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        print!("{}", render(&view));
    }
    Ok(())
}

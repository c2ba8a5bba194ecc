// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Write;

use anyhow::{bail, Result};
use clap::parser::ValueSource;
use chrono::Datelike;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{category_totals, compute_totals, monthly_series, MonthlyEntry, PeriodSummary};
use crate::db::{load_transactions, TransactionFilter};
use crate::models::Transaction;
use crate::period::Period;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table, today};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub title: String,
    pub currency: String,
    pub summary: PeriodSummary,
    pub monthly: Vec<MonthlyEntry>,
    pub categories: Vec<CategoryRow>,
}

pub fn build_report(period: Period, transactions: &[Transaction], currency: &str) -> PeriodReport {
    let mut categories: Vec<CategoryRow> = category_totals(transactions)
        .into_iter()
        .map(|(category, t)| CategoryRow {
            category,
            income: t.income,
            expense: t.expense,
            balance: t.balance(),
        })
        .collect();
    categories.sort_by(|a, b| a.category.cmp(&b.category));
    PeriodReport {
        period,
        title: period.to_string(),
        currency: currency.to_string(),
        summary: compute_totals(transactions),
        monthly: monthly_series(transactions),
        categories,
    }
}

pub fn render(report: &PeriodReport) -> String {
    let ccy = &report.currency;
    let mut out = String::new();
    let _ = writeln!(out, "Report: {}", report.title);
    let totals = pretty_table(
        &["Total income", "Total expense", "Balance"],
        vec![vec![
            fmt_money(&report.summary.total_income, ccy),
            fmt_money(&report.summary.total_expense, ccy),
            fmt_money(&report.summary.balance, ccy),
        ]],
    );
    let _ = writeln!(out, "{}", totals);

    if report.monthly.is_empty() {
        let _ = writeln!(out, "No transactions in this period");
        return out;
    }

    let rows = report
        .monthly
        .iter()
        .map(|m| {
            vec![
                m.label.clone(),
                fmt_money(&m.income, ccy),
                fmt_money(&m.expense, ccy),
                fmt_money(&m.balance, ccy),
            ]
        })
        .collect();
    let _ = writeln!(out, "Monthly evolution");
    let _ = writeln!(
        out,
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
    );

    let rows = report
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.income, ccy),
                fmt_money(&c.expense, ccy),
                fmt_money(&c.balance, ccy),
            ]
        })
        .collect();
    let _ = writeln!(out, "Summary by category");
    let _ = writeln!(
        out,
        "{}",
        pretty_table(&["Category", "Income", "Expense", "Balance"], rows)
    );
    out
}

/// `--period month` is always the current month; `--period year` takes
/// `--year`, defaulting to the current one. `--year` alone implies
/// `--period year`.
pub fn period_for(sub: &clap::ArgMatches) -> Result<Period> {
    let now = today();
    let year = sub.get_one::<i32>("year").copied();
    let explicit_month = sub.value_source("period") == Some(ValueSource::CommandLine)
        && sub.get_one::<String>("period").map(String::as_str) == Some("month");
    if explicit_month && year.is_some() {
        bail!("--year cannot be combined with --period month");
    }
    let wants_year =
        year.is_some() || sub.get_one::<String>("period").map(String::as_str) == Some("year");
    let period = if wants_year {
        Period::year(year.unwrap_or(now.year()))?
    } else {
        Period::current_month(now)
    };
    Ok(period)
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_for(sub)?;
    let transactions = load_transactions(conn, &TransactionFilter::for_period(period))?;
    let report = build_report(period, &transactions, &get_currency(conn)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        print!("{}", render(&report));
    }
    Ok(())
}

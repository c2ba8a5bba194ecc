// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use fincontrol::commands::reports::{build_report, period_for, render};
use fincontrol::db::{self, load_transactions, TransactionFilter};
use fincontrol::models::{NewTransaction, TransactionStatus, TransactionType};
use fincontrol::period::Period;
use fincontrol::{cli, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let salary = db::insert_category(&conn, "Salary", TransactionType::Income).unwrap();
    let food = db::insert_category(&conn, "Food", TransactionType::Expense).unwrap();
    // inserted out of date order on purpose
    for (kind, cat, amount, date) in [
        (TransactionType::Expense, food, "200", "2024-02-03"),
        (TransactionType::Income, salary, "1000", "2024-01-05"),
        (TransactionType::Expense, food, "80", "2024-11-30"),
        (TransactionType::Expense, food, "300", "2024-01-20"),
        (TransactionType::Income, salary, "500", "2023-12-28"),
    ] {
        db::insert_transaction(
            &conn,
            &NewTransaction {
                kind,
                amount: d(amount),
                date: utils::parse_date(date).unwrap(),
                category_id: Some(cat),
                description: "r".into(),
                status: TransactionStatus::Pending,
            },
        )
        .unwrap();
    }
    conn
}

#[test]
fn year_report_from_the_store() {
    let conn = setup();
    let period = Period::year(2024).unwrap();
    let txs = load_transactions(&conn, &TransactionFilter::for_period(period)).unwrap();
    let report = build_report(period, &txs, "BRL");

    assert_eq!(report.summary.total_income, d("1000"));
    assert_eq!(report.summary.total_expense, d("580"));
    assert_eq!(report.summary.balance, d("420"));

    let labels: Vec<_> = report.monthly.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan/24", "Feb/24", "Nov/24"]);
    assert_eq!(report.monthly[0].balance, d("700"));
    assert_eq!(report.monthly[1].balance, d("-200"));

    let cats: Vec<_> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(cats, vec!["Food", "Salary"]);
    assert_eq!(report.categories[0].expense, d("580"));
    assert_eq!(report.categories[0].balance, d("-580"));
    assert_eq!(report.categories[1].income, d("1000"));

    let text = render(&report);
    assert!(text.contains("Report: 2024"));
    assert!(text.contains("Monthly evolution"));
    assert!(text.contains("Summary by category"));
}

#[test]
fn report_spanning_years_stays_chronological() {
    let conn = setup();
    let period = Period::range(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
    .unwrap();
    let txs = load_transactions(&conn, &TransactionFilter::for_period(period)).unwrap();
    let report = build_report(period, &txs, "BRL");
    let labels: Vec<_> = report.monthly.iter().map(|m| m.label.clone()).collect();
    assert_eq!(labels, vec!["Dec/23", "Jan/24", "Feb/24", "Nov/24"]);
}

#[test]
fn empty_period_report() {
    let conn = setup();
    let period = Period::year(2020).unwrap();
    let txs = load_transactions(&conn, &TransactionFilter::for_period(period)).unwrap();
    let report = build_report(period, &txs, "BRL");
    assert!(report.monthly.is_empty());
    assert!(report.categories.is_empty());
    assert_eq!(report.summary.balance, Decimal::ZERO);
    assert!(render(&report).contains("No transactions in this period"));
}

#[test]
fn report_serializes_amounts_as_strings() {
    let conn = setup();
    let period = Period::year(2024).unwrap();
    let txs = load_transactions(&conn, &TransactionFilter::for_period(period)).unwrap();
    let v = serde_json::to_value(build_report(period, &txs, "BRL")).unwrap();
    assert_eq!(v["summary"]["balance"], "420");
    assert_eq!(v["monthly"][0]["label"], "Jan/24");
    assert_eq!(v["period"]["kind"], "year");
}

#[test]
fn period_arguments() {
    let matches = cli::build_cli().get_matches_from(["fincontrol", "report", "--period", "year", "--year", "2023"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert_eq!(period_for(sub).unwrap(), Period::Year(2023));

    let matches = cli::build_cli().get_matches_from(["fincontrol", "report", "--year", "2022"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert_eq!(period_for(sub).unwrap(), Period::Year(2022));

    let matches = cli::build_cli()
        .get_matches_from(["fincontrol", "report", "--period", "month", "--year", "2022"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(period_for(sub).is_err());

    let matches = cli::build_cli().get_matches_from(["fincontrol", "report"]);
    let (_, sub) = matches.subcommand().unwrap();
    match period_for(sub).unwrap() {
        Period::Month(ym) => assert_eq!(ym.year, utils::today().year()),
        other => panic!("expected current month, got {:?}", other),
    }
}

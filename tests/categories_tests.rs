// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fincontrol::db::{self, load_categories};
use fincontrol::models::TransactionType;
use fincontrol::{cli, commands::categories, commands::config, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn category_cmd(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let argv: Vec<&str> = ["fincontrol", "category"].iter().chain(args).copied().collect();
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, sub) = matches.subcommand().unwrap();
    categories::handle(conn, sub)
}

#[test]
fn add_defaults_to_expense_and_lists_income_first() {
    let conn = setup();
    category_cmd(&conn, &["add", "--name", "Rent"]).unwrap();
    category_cmd(&conn, &["add", "--name", "  Food "]).unwrap();
    category_cmd(&conn, &["add", "--name", "Salary", "--type", "income"]).unwrap();

    let cats = load_categories(&conn, None).unwrap();
    let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Salary", "Food", "Rent"]);
    assert_eq!(cats[1].kind, TransactionType::Expense);

    let income = load_categories(&conn, Some(TransactionType::Income)).unwrap();
    assert_eq!(income.len(), 1);
}

#[test]
fn blank_and_duplicate_names_are_rejected() {
    let conn = setup();
    let err = category_cmd(&conn, &["add", "--name", "   "]).unwrap_err();
    assert!(err.to_string().contains("Category name is required"));

    category_cmd(&conn, &["add", "--name", "Food"]).unwrap();
    let err = category_cmd(&conn, &["add", "--name", "Food", "--type", "income"]).unwrap_err();
    assert!(err.to_string().contains("Could not add category 'Food'"));
}

#[test]
fn removing_unknown_category_fails() {
    let conn = setup();
    assert!(category_cmd(&conn, &["rm", "--name", "Ghost"]).is_err());
}

#[test]
fn display_currency_setting() {
    let conn = setup();
    assert_eq!(utils::get_currency(&conn).unwrap(), "BRL");

    let matches = cli::build_cli().get_matches_from(["fincontrol", "config", "currency", "usd"]);
    let (_, sub) = matches.subcommand().unwrap();
    config::handle(&conn, sub).unwrap();
    assert_eq!(utils::get_currency(&conn).unwrap(), "USD");

    let matches = cli::build_cli().get_matches_from(["fincontrol", "config", "currency", "dollars"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(config::handle(&conn, sub).is_err());
    assert_eq!(utils::fmt_money(&"3.5".parse().unwrap(), "USD"), "USD 3.50");
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::category_key;
use crate::db::{delete_transaction, insert_transaction, load_transactions, TransactionFilter};
use crate::models::{NewTransaction, Transaction, TransactionStatus, TransactionType};
use crate::utils::{
    fmt_signed, get_currency, id_for_category, maybe_print_json, parse_date, parse_decimal,
    period_from_args, pretty_table, today,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub.get_one::<String>("type").unwrap().parse::<TransactionType>()?;
    let category = sub.get_one::<String>("category").unwrap();
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let status = sub.get_one::<String>("status").unwrap().parse::<TransactionStatus>()?;

    let category_id = id_for_category(conn, category)?;
    let category_kind: String = conn.query_row(
        "SELECT type FROM categories WHERE id=?1",
        params![category_id],
        |r| r.get(0),
    )?;
    if category_kind != kind.as_str() {
        bail!(
            "Category '{}' is an {} category, cannot record an {} in it",
            category.trim(),
            category_kind,
            kind
        );
    }

    let tx = NewTransaction {
        kind,
        amount,
        date,
        category_id: Some(category_id),
        description: description.to_string(),
        status,
    };
    let id = insert_transaction(conn, &tx)?;
    tracing::info!(id, %kind, %amount, %date, "transaction recorded");
    println!(
        "Recorded {} #{} of {} on {} in '{}'",
        kind,
        id,
        amount,
        date,
        category.trim()
    );
    Ok(())
}

/// Applies the `tx list` arguments to the store.
pub fn query(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter {
        period: period_from_args(sub)?,
        category_id: sub
            .get_one::<String>("category")
            .map(|c| id_for_category(conn, c))
            .transpose()?,
        kind: sub
            .get_one::<String>("type")
            .map(|t| t.parse::<TransactionType>())
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    load_transactions(conn, &filter)
}

/// Table row for the ledger and the dashboard's recent list.
pub fn ledger_row(t: &Transaction, ccy: &str) -> Vec<String> {
    vec![
        t.id.to_string(),
        t.date.format("%d/%m/%Y").to_string(),
        t.description.clone(),
        category_key(t).to_string(),
        t.kind.to_string(),
        fmt_signed(&t.signed_amount(), ccy),
        t.status.to_string(),
    ]
}

pub const LEDGER_HEADERS: [&str; 7] = [
    "ID",
    "Date",
    "Description",
    "Category",
    "Type",
    "Amount",
    "Status",
];

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No transactions found");
            return Ok(());
        }
        let ccy = get_currency(conn)?;
        let rows = data.iter().map(|t| ledger_row(t, &ccy)).collect();
        println!("{}", pretty_table(&LEDGER_HEADERS, rows));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !delete_transaction(conn, id)? {
        bail!("Transaction #{} not found", id);
    }
    tracing::info!(id, "transaction removed");
    println!("Removed transaction #{}", id);
    Ok(())
}

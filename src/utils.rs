// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::period::{Period, YearMonth};

pub const DEFAULT_CURRENCY: &str = "BRL";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    s.parse::<YearMonth>()
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

/// Money with an explicit sign, as the ledger shows it.
pub fn fmt_signed(d: &Decimal, ccy: &str) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("- {}", fmt_money(&d.abs(), ccy))
    } else {
        format!("+ {}", fmt_money(d, ccy))
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_category(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name.trim()], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name.trim()))?;
    Ok(id)
}

// Display currency setting
pub fn get_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

/// Reads the shared `--month`/`--year`/`--from`/`--to` arguments.
pub fn period_from_args(sub: &clap::ArgMatches) -> Result<Option<Period>> {
    if let Some(m) = sub.get_one::<String>("month") {
        return Ok(Some(Period::Month(parse_month(m)?)));
    }
    if let Some(y) = sub.get_one::<i32>("year") {
        return Ok(Some(Period::year(*y)?));
    }
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    match (from, to) {
        (None, None) => Ok(None),
        (Some(f), Some(t)) => Ok(Some(Period::range(f, t)?)),
        (Some(f), None) => Ok(Some(Period::range(f, Period::latest())?)),
        (None, Some(t)) => Ok(Some(Period::range(Period::earliest(), t)?)),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

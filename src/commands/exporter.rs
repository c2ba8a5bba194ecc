// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::aggregate::category_key;
use crate::db::{load_transactions, TransactionFilter};
use crate::utils::period_from_args;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let filter = TransactionFilter {
        period: period_from_args(sub)?,
        ..TransactionFilter::default()
    };
    let mut rows = load_transactions(conn, &filter)?;
    // oldest first in files
    rows.reverse();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "id",
            "date",
            "type",
            "amount",
            "category",
            "description",
            "status",
        ])?;
        for t in &rows {
            wtr.write_record([
                t.id.to_string(),
                t.date.to_string(),
                t.kind.to_string(),
                t.amount.to_string(),
                category_key(t).to_string(),
                t.description.clone(),
                t.status.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
    }
    tracing::info!(count = rows.len(), format = %fmt, out = %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

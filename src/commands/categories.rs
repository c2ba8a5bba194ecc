// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{delete_category, insert_category, load_categories};
use crate::models::TransactionType;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                bail!("Category name is required");
            }
            let kind = sub.get_one::<String>("type").unwrap().parse::<TransactionType>()?;
            insert_category(conn, name, kind)?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TransactionType>())
                .transpose()?;
            let cats = load_categories(conn, kind)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .into_iter()
                    .map(|c| vec![c.name, c.kind.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Category", "Type"], data));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if !delete_category(conn, name)? {
                bail!("Category '{}' not found", name);
            }
            tracing::info!(category = name, "category removed");
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

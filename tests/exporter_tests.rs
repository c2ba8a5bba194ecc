// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fincontrol::db;
use fincontrol::models::TransactionType;
use fincontrol::{cli, commands::exporter};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::insert_category(&conn, "Groceries", TransactionType::Expense).unwrap();
    conn.execute(
        "INSERT INTO transactions(date,type,amount,category_id,description,status) VALUES \
        ('2025-01-02','expense','12.34',1,'Corner Shop','pending'), \
        ('2025-02-10','expense','5',NULL,'Bus','paid')",
        [],
    )
    .unwrap();
    conn
}

fn export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let argv: Vec<&str> = ["fincontrol", "export", "transactions"]
        .iter()
        .chain(args)
        .copied()
        .collect();
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_writes_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["--format", "json", "--out", &out_str, "--month", "2025-01"]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 1,
                "type": "expense",
                "amount": "12.34",
                "date": "2025-01-02",
                "category_id": 1,
                "category_name": "Groceries",
                "description": "Corner Shop",
                "status": "pending"
            }
        ])
    );
}

#[test]
fn export_transactions_csv_uses_sentinel_for_missing_category() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["--out", &out_str]).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "2025-01-02");
    assert_eq!(&rows[0][4], "Groceries");
    assert_eq!(&rows[1][4], "(uncategorized)");
    assert_eq!(&rows[1][6], "paid");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&conn, &["--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}

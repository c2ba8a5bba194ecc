// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::models::{Category, NewTransaction, Transaction, TransactionStatus, TransactionType};
use crate::period::Period;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.fincontrol", "Fincontrol", "fincontrol"));

/// Overrides the platform data directory when set.
pub const DB_ENV: &str = "FINCONTROL_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fincontrol.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    tracing::debug!(path = %path.display(), "opening database");
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL CHECK(type IN ('income','expense'))
    );

    -- type is left unchecked here; rows are validated when read
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        amount TEXT NOT NULL,
        category_id INTEGER,
        description TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'paid',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

/// Selection applied by the store before anything is aggregated.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub period: Option<Period>,
    pub category_id: Option<i64>,
    pub kind: Option<TransactionType>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn for_period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }
}

/// Newest first. Any row with an unknown type fails the whole load.
pub fn load_transactions(conn: &Connection, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, t.type, t.amount, t.category_id, c.name, t.description, t.status
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(period) = filter.period {
        let (start, end) = period.bounds();
        sql.push_str(" AND t.date BETWEEN ? AND ?");
        params_vec.push(start.to_string());
        params_vec.push(end.to_string());
    }
    if let Some(cat) = filter.category_id {
        sql.push_str(" AND t.category_id=?");
        params_vec.push(cat.to_string());
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND t.type=?");
        params_vec.push(kind.as_str().to_string());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let status: String = r.get(7)?;
        data.push(Transaction {
            id,
            kind: kind
                .parse::<TransactionType>()
                .with_context(|| format!("Transaction {} has an unusable type", id))?,
            amount: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' on transaction {}", amount, id))?,
            date: crate::utils::parse_date(&date)?,
            category_id: r.get(4)?,
            category_name: r.get(5)?,
            description: r.get(6)?,
            status: status
                .parse::<TransactionStatus>()
                .with_context(|| format!("Transaction {} has an unusable status", id))?,
        });
    }
    tracing::debug!(count = data.len(), ?filter, "loaded transactions");
    Ok(data)
}

pub fn insert_transaction(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    tx.validate()?;
    conn.execute(
        "INSERT INTO transactions(date, type, amount, category_id, description, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            tx.date.to_string(),
            tx.kind.as_str(),
            tx.amount.to_string(),
            tx.category_id,
            tx.description.trim(),
            tx.status.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

/// Income categories first, then expense, each by name.
pub fn load_categories(conn: &Connection, kind: Option<TransactionType>) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type FROM categories
         WHERE ?1 IS NULL OR type=?1
         ORDER BY CASE type WHEN 'income' THEN 0 ELSE 1 END, name",
    )?;
    let mut rows = stmt.query(params![kind.map(|k| k.as_str())])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(2)?;
        data.push(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            kind: kind.parse::<TransactionType>()?,
        });
    }
    Ok(data)
}

pub fn insert_category(conn: &Connection, name: &str, kind: TransactionType) -> Result<i64> {
    conn.execute(
        "INSERT INTO categories(name, type) VALUES (?1, ?2)",
        params![name, kind.as_str()],
    )
    .with_context(|| format!("Could not add category '{}'", name))?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_category(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
    Ok(n > 0)
}

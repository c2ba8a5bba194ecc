// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Returns `[issue, detail]` rows; empty when the store is consistent.
pub fn check(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Types the aggregation cannot handle
    let mut stmt = conn.prepare("SELECT id, type FROM transactions ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(1)?;
        if kind.parse::<TransactionType>().is_err() {
            rows.push(vec!["invalid_type".into(), format!("#{} '{}'", id, kind)]);
        }
    }

    // 2) Transaction type differs from its category's type
    let mut stmt = conn.prepare(
        "SELECT t.id, t.type, c.name, c.type FROM transactions t
         JOIN categories c ON t.category_id=c.id
         WHERE t.type IN ('income','expense') AND t.type != c.type ORDER BY t.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let t_kind: String = r.get(1)?;
        let cat: String = r.get(2)?;
        let c_kind: String = r.get(3)?;
        rows.push(vec![
            "type_mismatch".into(),
            format!("#{} is {} but '{}' is {}", id, t_kind, cat, c_kind),
        ]);
    }

    // 3) No category (deleted or never set)
    let mut stmt =
        conn.prepare("SELECT id, date FROM transactions WHERE category_id IS NULL ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        rows.push(vec!["uncategorized".into(), format!("#{} {}", id, d)]);
    }

    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = check(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found issues");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

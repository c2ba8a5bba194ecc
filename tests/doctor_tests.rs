// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fincontrol::commands::doctor;
use fincontrol::db;
use fincontrol::error::FinanceError;
use fincontrol::models::TransactionType;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::insert_category(&conn, "Salary", TransactionType::Income).unwrap();
    db::insert_category(&conn, "Food", TransactionType::Expense).unwrap();
    conn
}

#[test]
fn clean_store_has_no_issues() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,type,amount,category_id,description) VALUES ('2024-01-01','income','10',1,'pay')",
        [],
    )
    .unwrap();
    assert!(doctor::check(&conn).unwrap().is_empty());
}

#[test]
fn reports_mismatches_missing_categories_and_bad_types() {
    let conn = setup();
    conn.execute_batch(
        "INSERT INTO transactions(date,type,amount,category_id,description) VALUES ('2024-01-01','income','10',2,'refund');
         INSERT INTO transactions(date,type,amount,category_id,description) VALUES ('2024-01-02','expense','3',NULL,'misc');
         INSERT INTO transactions(date,type,amount,category_id,description) VALUES ('2024-01-03','transfer','3',1,'move');",
    )
    .unwrap();
    let issues = doctor::check(&conn).unwrap();
    let kinds: Vec<_> = issues.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(
        kinds,
        vec!["invalid_type", "type_mismatch", "uncategorized"]
    );
    assert_eq!(issues[1][1], "#1 is income but 'Food' is expense");
}

#[test]
fn wrongly_cased_type_is_invalid_not_a_mismatch() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,type,amount,category_id,description) VALUES ('2024-01-01','Income','10',1,'pay')",
        [],
    )
    .unwrap();
    let issues = doctor::check(&conn).unwrap();
    assert_eq!(issues, vec![vec!["invalid_type".to_string(), "#1 'Income'".to_string()]]);

    let err = db::load_transactions(&conn, &db::TransactionFilter::default()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FinanceError>(),
        Some(&FinanceError::InvalidTransactionType("Income".into()))
    );
}

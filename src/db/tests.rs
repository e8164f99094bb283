#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn make_txn(desc: &str, amount: Decimal, kind: TransactionType, ts: i64, cat: &str) -> Transaction {
    Transaction::new(desc.into(), amount, kind, ts, cat.into(), None)
}

fn setup_test_data(db: &Database) -> Vec<i64> {
    let txns = [
        make_txn("Weekly shop", dec!(54.20), TransactionType::Expense, 1_000, "Groceries"),
        make_txn("Salary", dec!(2500), TransactionType::Income, 3_000, "Salary"),
        make_txn("Bus ticket", dec!(1.80), TransactionType::Expense, 2_000, "Transport"),
        make_txn("Cinema", dec!(12), TransactionType::Expense, 5_000, "Entertainment"),
    ];
    txns.iter().map(|t| db.insert_transaction(t).unwrap()).collect()
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_all_transactions().unwrap().is_empty());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_migrates_v1_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL);
             INSERT INTO schema_version (version) VALUES (1);
             CREATE TABLE transactions (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 description TEXT NOT NULL,
                 amount TEXT NOT NULL,
                 type TEXT NOT NULL,
                 timestamp INTEGER NOT NULL,
                 category TEXT NOT NULL
             );
             INSERT INTO transactions (description, amount, type, timestamp, category)
             VALUES ('Rent', '-800', 'EXPENSE', 10, 'Housing');",
        )
        .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let all = db.get_all_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec!(-800));
    assert!(all[0].note.is_none());

    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_current_database_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.db");
    {
        let db = Database::open(&path).unwrap();
        setup_test_data(&db);
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 4);
}

// ── Insert / fetch ────────────────────────────────────────────

#[test]
fn test_insert_and_fetch_by_id_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let txn = Transaction::new(
        "Birthday".into(),
        dec!(50),
        TransactionType::Income,
        1_700_000_000_123,
        "Gift".into(),
        Some("from grandma".into()),
    );
    let id = db.insert_transaction(&txn).unwrap();

    let fetched = db.get_transaction_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.description, "Birthday");
    assert_eq!(fetched.amount, dec!(50));
    assert_eq!(fetched.transaction_type, TransactionType::Income);
    assert_eq!(fetched.timestamp, 1_700_000_000_123);
    assert_eq!(fetched.category, "Gift");
    assert_eq!(fetched.note.as_deref(), Some("from grandma"));
}

#[test]
fn test_fetch_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_transaction_by_id(99999).unwrap().is_none());
}

#[test]
fn test_ids_auto_assigned() {
    let db = Database::open_in_memory().unwrap();
    let ids = setup_test_data(&db);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_insert_with_existing_id_replaces() {
    let db = Database::open_in_memory().unwrap();
    let ids = setup_test_data(&db);

    let mut txn = db.get_transaction_by_id(ids[0]).unwrap().unwrap();
    txn.description = "Big weekly shop".into();
    let id = db.insert_transaction(&txn).unwrap();

    assert_eq!(id, ids[0]);
    assert_eq!(db.get_transaction_count().unwrap(), 4);
    let fetched = db.get_transaction_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.description, "Big weekly shop");
}

#[test]
fn test_decimal_precision_preserved() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_transaction(&make_txn("Odd", dec!(0.10), TransactionType::Expense, 1, "Other"))
        .unwrap();
    let fetched = db.get_transaction_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(-0.10));
}

#[test]
fn test_get_all_newest_first() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let all = db.get_all_transactions().unwrap();
    let stamps: Vec<i64> = all.iter().map(|t| t.timestamp).collect();
    assert_eq!(stamps, vec![5_000, 3_000, 2_000, 1_000]);
}

#[test]
fn test_same_timestamp_orders_by_id_desc() {
    let db = Database::open_in_memory().unwrap();
    let a = db
        .insert_transaction(&make_txn("A", dec!(1), TransactionType::Income, 7, "Other"))
        .unwrap();
    let b = db
        .insert_transaction(&make_txn("B", dec!(1), TransactionType::Income, 7, "Other"))
        .unwrap();
    let all = db.get_all_transactions().unwrap();
    assert_eq!(all[0].id, Some(b));
    assert_eq!(all[1].id, Some(a));
}

// ── Range queries ─────────────────────────────────────────────

#[test]
fn test_between_is_inclusive() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let rows = db.get_transactions_between(2_000, 3_000).unwrap();
    let descs: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["Salary", "Bus ticket"]);
}

#[test]
fn test_between_no_results() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    assert!(db.get_transactions_between(6_000, 9_000).unwrap().is_empty());
}

#[test]
fn test_between_inverted_range_is_empty() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    assert!(db.get_transactions_between(5_000, 1_000).unwrap().is_empty());
}

// ── Update / delete ───────────────────────────────────────────

#[test]
fn test_update_transaction() {
    let db = Database::open_in_memory().unwrap();
    let ids = setup_test_data(&db);
    let mut txn = db.get_transaction_by_id(ids[2]).unwrap().unwrap();
    txn.note = Some("airport".into());
    txn.category = "Other".into();
    assert!(db.update_transaction(&txn).unwrap());

    let fetched = db.get_transaction_by_id(ids[2]).unwrap().unwrap();
    assert_eq!(fetched.note.as_deref(), Some("airport"));
    assert_eq!(fetched.category, "Other");
}

#[test]
fn test_update_missing_row_returns_false() {
    let db = Database::open_in_memory().unwrap();
    let mut txn = make_txn("Ghost", dec!(1), TransactionType::Income, 1, "Other");
    txn.id = Some(4242);
    assert!(!db.update_transaction(&txn).unwrap());
}

#[test]
fn test_update_without_id_errors() {
    let db = Database::open_in_memory().unwrap();
    let txn = make_txn("No id", dec!(1), TransactionType::Income, 1, "Other");
    assert!(db.update_transaction(&txn).is_err());
}

#[test]
fn test_delete_transaction() {
    let db = Database::open_in_memory().unwrap();
    let ids = setup_test_data(&db);
    db.delete_transaction(ids[1]).unwrap();
    assert!(db.get_transaction_by_id(ids[1]).unwrap().is_none());
    assert_eq!(db.get_transaction_count().unwrap(), 3);
}

#[test]
fn test_delete_missing_is_noop() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    db.delete_transaction(99999).unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 4);
}

#[test]
fn test_delete_all() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    assert_eq!(db.delete_all_transactions().unwrap(), 4);
    assert!(db.get_all_transactions().unwrap().is_empty());
}

// ── Revision / live queries ───────────────────────────────────

#[test]
fn test_revision_moves_on_writes_only() {
    let db = Database::open_in_memory().unwrap();
    let r0 = db.revision();
    let ids = setup_test_data(&db);
    let r1 = db.revision();
    assert!(r1 > r0);

    db.get_all_transactions().unwrap();
    db.delete_transaction(99999).unwrap();
    assert_eq!(db.revision(), r1);

    db.delete_transaction(ids[0]).unwrap();
    assert!(db.revision() > r1);
}

#[test]
fn test_live_query_reloads_after_write() {
    let db = Database::open_in_memory().unwrap();
    let mut live = LiveQuery::new(TransactionQuery::All);
    assert!(live.refresh(&db).unwrap());
    assert!(live.rows().is_empty());

    assert!(!live.refresh(&db).unwrap());

    setup_test_data(&db);
    assert!(live.refresh(&db).unwrap());
    assert_eq!(live.rows().len(), 4);
    assert!(!live.refresh(&db).unwrap());
}

#[test]
fn test_live_query_reloads_on_new_range() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let mut live = LiveQuery::new(TransactionQuery::Between {
        start_ms: 0,
        end_ms: 2_500,
    });
    live.refresh(&db).unwrap();
    assert_eq!(live.rows().len(), 2);

    live.set_query(TransactionQuery::Between {
        start_ms: 0,
        end_ms: 2_500,
    });
    assert!(!live.refresh(&db).unwrap());

    live.set_query(TransactionQuery::Between {
        start_ms: 2_500,
        end_ms: 10_000,
    });
    assert!(live.refresh(&db).unwrap());
    assert_eq!(live.rows().len(), 2);
    assert_eq!(live.rows()[0].description, "Cinema");
}

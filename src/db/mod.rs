mod live;
mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::cell::Cell;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) use live::{LiveQuery, TransactionQuery};

const SELECT_COLUMNS: &str =
    "SELECT id, description, amount, type, timestamp, category, note FROM transactions";

pub(crate) struct Database {
    conn: Connection,
    revision: Cell<u64>,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self {
            conn,
            revision: Cell::new(0),
        };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self {
            conn,
            revision: Cell::new(0),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database
            self.conn.execute_batch(schema::SCHEMA)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        let tx = self.conn.transaction()?;
        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying schema migration");
                tx.execute_batch(sql)?;
            }
        }
        if current < schema::CURRENT_VERSION {
            tx.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Write counter; bumped by every statement that changes the table.
    pub(crate) fn revision(&self) -> u64 {
        self.revision.get()
    }

    fn bump(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
    }

    // ── Transactions ──────────────────────────────────────────

    /// Inserts `txn`. A transaction that already carries an id replaces the
    /// row with that id.
    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT OR REPLACE INTO transactions (id, description, amount, type, timestamp, category, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                txn.id,
                txn.description,
                txn.amount.to_string(),
                txn.transaction_type.as_str(),
                txn.timestamp,
                txn.category,
                txn.note,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.bump();
        tracing::info!(id, amount = %txn.amount, category = %txn.category, "transaction inserted");
        Ok(id)
    }

    /// Overwrites every column of the row identified by `txn.id`.
    /// Returns false when no such row exists.
    pub(crate) fn update_transaction(&self, txn: &Transaction) -> Result<bool> {
        let id = txn
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a transaction without an id"))?;
        let changed = self.conn.execute(
            "UPDATE transactions
             SET description = ?1, amount = ?2, type = ?3, timestamp = ?4, category = ?5, note = ?6
             WHERE id = ?7",
            params![
                txn.description,
                txn.amount.to_string(),
                txn.transaction_type.as_str(),
                txn.timestamp,
                txn.category,
                txn.note,
                id,
            ],
        )?;
        if changed > 0 {
            self.bump();
            tracing::info!(id, "transaction updated");
        }
        Ok(changed > 0)
    }

    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed > 0 {
            self.bump();
            tracing::info!(id, "transaction deleted");
        }
        Ok(())
    }

    pub(crate) fn delete_all_transactions(&self) -> Result<usize> {
        let count = self.conn.execute("DELETE FROM transactions", [])?;
        self.bump();
        tracing::warn!(count, "all transactions deleted");
        Ok(count)
    }

    /// Every transaction, newest first.
    pub(crate) fn get_all_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY timestamp DESC, id DESC"))?;
        let rows = stmt.query_map([], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let result = self.conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            row_to_transaction,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Transactions with `start_ms <= timestamp <= end_ms`, newest first.
    pub(crate) fn get_transactions_between(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE timestamp BETWEEN ?1 AND ?2 ORDER BY timestamp DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![start_ms, end_ms], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_str: String = row.get(2)?;
    let type_str: String = row.get(3)?;
    let amount = Decimal::from_str(&amount_str).unwrap_or_default();
    // Unknown type values fall back to the amount's sign.
    let transaction_type = TransactionType::parse(&type_str).unwrap_or(if amount < Decimal::ZERO {
        TransactionType::Expense
    } else {
        TransactionType::Income
    });
    Ok(Transaction {
        id: Some(row.get(0)?),
        description: row.get(1)?,
        amount,
        transaction_type,
        timestamp: row.get(4)?,
        category: row.get(5)?,
        note: row.get(6)?,
    })
}

#[cfg(test)]
mod tests;

use anyhow::Result;

use super::Database;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionQuery {
    All,
    /// Inclusive range of epoch milliseconds.
    Between { start_ms: i64, end_ms: i64 },
}

/// A query result that follows the store.
///
/// `refresh` re-runs the query only when the database revision has moved
/// since the last load, or when the query itself was replaced with
/// `set_query`.
#[derive(Debug)]
pub(crate) struct LiveQuery {
    query: TransactionQuery,
    seen_revision: Option<u64>,
    rows: Vec<Transaction>,
}

impl LiveQuery {
    pub(crate) fn new(query: TransactionQuery) -> Self {
        Self {
            query,
            seen_revision: None,
            rows: Vec::new(),
        }
    }

    pub(crate) fn query(&self) -> TransactionQuery {
        self.query
    }

    /// Swap the query; the next `refresh` reloads regardless of revision.
    pub(crate) fn set_query(&mut self, query: TransactionQuery) {
        if self.query != query {
            self.query = query;
            self.seen_revision = None;
        }
    }

    /// Returns true when rows were reloaded.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<bool> {
        let revision = db.revision();
        if self.seen_revision == Some(revision) {
            return Ok(false);
        }
        self.rows = match self.query {
            TransactionQuery::All => db.get_all_transactions()?,
            TransactionQuery::Between { start_ms, end_ms } => {
                db.get_transactions_between(start_ms, end_ms)?
            }
        };
        self.seen_revision = Some(revision);
        Ok(true)
    }

    pub(crate) fn rows(&self) -> &[Transaction] {
        &self.rows
    }
}

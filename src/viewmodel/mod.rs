mod form;

use anyhow::Result;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::db::{Database, LiveQuery, TransactionQuery};
use crate::models::{StatisticsPeriod, Transaction, TransactionType};
use crate::stats::{self, MonthBucket, PeriodTotals};

use form::TransactionForm;
#[cfg(test)]
pub(crate) use form::{parse_amount, FormError};
pub(crate) use form::{FormField, ValidationErrors};

/// Form state for a new transaction plus the aggregates derived from the store.
///
/// Derived values are recomputed in `sync`, which callers invoke once per
/// frame (or once per CLI command). Nothing is reloaded unless the store was
/// written to or the statistics period changed.
pub(crate) struct TransactionViewModel {
    form: TransactionForm,

    statistics_period: StatisticsPeriod,
    period_dirty: bool,
    window_revision: Option<u64>,

    all_transactions: LiveQuery,
    transactions_for_statistics: LiveQuery,

    total_balance: Decimal,
    period_totals: PeriodTotals,
    monthly_buckets: Vec<MonthBucket>,
}

impl TransactionViewModel {
    pub(crate) fn new(period: StatisticsPeriod) -> Self {
        Self {
            form: TransactionForm::default(),
            statistics_period: period,
            period_dirty: true,
            window_revision: None,
            all_transactions: LiveQuery::new(TransactionQuery::All),
            transactions_for_statistics: LiveQuery::new(TransactionQuery::Between {
                start_ms: 0,
                end_ms: 0,
            }),
            total_balance: Decimal::ZERO,
            period_totals: PeriodTotals::default(),
            monthly_buckets: Vec::new(),
        }
    }

    // ── Form state ────────────────────────────────────────────

    pub(crate) fn form(&self) -> &TransactionForm {
        &self.form
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub(crate) fn set_amount_text(&mut self, amount: impl Into<String>) {
        self.form.amount_text = amount.into();
    }

    /// Changing the type invalidates the chosen category.
    pub(crate) fn set_transaction_type(&mut self, kind: TransactionType) {
        self.form.transaction_type = kind;
        self.set_selected_category("");
    }

    pub(crate) fn set_selected_category(&mut self, category: impl Into<String>) {
        self.form.category = category.into();
    }

    pub(crate) fn set_note(&mut self, note: &str) {
        self.form.note = if note.trim().is_empty() {
            None
        } else {
            Some(note.to_string())
        };
    }

    pub(crate) fn set_selected_date(&mut self, timestamp_ms: i64) {
        self.form.date = timestamp_ms;
    }

    pub(crate) fn clear_form(&mut self) {
        self.form = TransactionForm::default();
    }

    /// Validates the form and inserts the transaction, clearing the form on
    /// success. Validation failures surface as a `ValidationErrors` inside the
    /// returned error and leave the form untouched.
    pub(crate) fn add_transaction_from_form(&mut self, db: &Database) -> Result<i64> {
        let txn = match self.form.to_transaction() {
            Ok(t) => t,
            Err(errors) => {
                tracing::debug!(%errors, "form validation failed");
                return Err(errors.into());
            }
        };
        let id = db.insert_transaction(&txn)?;
        self.clear_form();
        Ok(id)
    }

    /// Loads a stored record into the form so it can be changed and resubmitted.
    pub(crate) fn load_form(&mut self, txn: &Transaction) {
        self.form = TransactionForm {
            description: txn.description.clone(),
            amount_text: txn.abs_amount().to_string(),
            transaction_type: txn.transaction_type,
            category: txn.category.clone(),
            note: txn.note.clone(),
            date: txn.timestamp,
        };
    }

    /// Validates the form and overwrites record `id`. Returns false when no
    /// such record exists; the form is only cleared after a successful write.
    pub(crate) fn update_transaction_from_form(&mut self, db: &Database, id: i64) -> Result<bool> {
        let mut txn = self.form.to_transaction()?;
        txn.id = Some(id);
        let updated = db.update_transaction(&txn)?;
        if updated {
            self.clear_form();
        }
        Ok(updated)
    }

    pub(crate) fn delete_transaction(&self, db: &Database, id: i64) -> Result<()> {
        db.delete_transaction(id)
    }

    pub(crate) fn delete_all_transactions(&self, db: &Database) -> Result<usize> {
        db.delete_all_transactions()
    }

    // ── Derived state ─────────────────────────────────────────

    pub(crate) fn statistics_period(&self) -> StatisticsPeriod {
        self.statistics_period
    }

    pub(crate) fn set_statistics_period(&mut self, period: StatisticsPeriod) {
        if self.statistics_period != period {
            self.statistics_period = period;
            self.period_dirty = true;
        }
    }

    /// Pulls fresh rows from the store when anything changed and recomputes
    /// the aggregates. Returns true when any derived value was recomputed.
    pub(crate) fn sync(&mut self, db: &Database, now: DateTime<Local>) -> Result<bool> {
        let mut changed = false;

        if self.all_transactions.refresh(db)? {
            self.total_balance = stats::balance(self.all_transactions.rows())?;
            changed = true;
        }

        // The window slides with `now` only when something else prompts a reload.
        if self.period_dirty || self.window_revision != Some(db.revision()) {
            let (start_ms, end_ms) = stats::period_window(self.statistics_period, now);
            self.transactions_for_statistics
                .set_query(TransactionQuery::Between { start_ms, end_ms });
            self.window_revision = Some(db.revision());
        }

        if self.transactions_for_statistics.refresh(db)? || self.period_dirty {
            let rows = self.transactions_for_statistics.rows();
            self.period_totals = stats::period_totals(rows)?;
            self.monthly_buckets = stats::monthly_buckets(rows, self.statistics_period, now)?;
            self.period_dirty = false;
            changed = true;
        }

        Ok(changed)
    }

    pub(crate) fn all_transactions(&self) -> &[Transaction] {
        self.all_transactions.rows()
    }

    pub(crate) fn total_balance(&self) -> Decimal {
        self.total_balance
    }

    pub(crate) fn transactions_for_statistics(&self) -> &[Transaction] {
        self.transactions_for_statistics.rows()
    }

    pub(crate) fn total_income_for_period(&self) -> Decimal {
        self.period_totals.income
    }

    /// Signed sum of the period's expenses (zero or negative).
    pub(crate) fn total_expense_for_period(&self) -> Decimal {
        self.period_totals.expense
    }

    pub(crate) fn period_balance(&self) -> Decimal {
        self.period_totals.balance()
    }

    pub(crate) fn monthly_buckets(&self) -> &[MonthBucket] {
        &self.monthly_buckets
    }

    /// Window currently applied to `transactions_for_statistics`.
    pub(crate) fn statistics_window(&self) -> Option<(i64, i64)> {
        match self.transactions_for_statistics.query() {
            TransactionQuery::Between { start_ms, end_ms } => Some((start_ms, end_ms)),
            TransactionQuery::All => None,
        }
    }
}

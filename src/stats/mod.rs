use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, Months, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{local_from_millis, StatisticsPeriod, Transaction, TransactionType};

/// Adds amounts, failing instead of overflowing `Decimal`.
fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .context("Stored amounts are too large to add up; delete the oversized transaction")
    })
}

/// Sum of every signed amount.
pub(crate) fn balance(txns: &[Transaction]) -> Result<Decimal> {
    checked_sum(txns.iter().map(|t| t.amount))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PeriodTotals {
    pub(crate) income: Decimal,
    /// Signed: zero or negative.
    pub(crate) expense: Decimal,
}

impl MonthBucket {
    pub(crate) fn is_empty(&self) -> bool {
        self.income.is_zero() && self.expense.is_zero()
    }
}

impl PeriodTotals {
    pub(crate) fn balance(&self) -> Decimal {
        self.income + self.expense
    }
}

/// Income and expense sums, split by transaction type rather than by sign.
pub(crate) fn period_totals(txns: &[Transaction]) -> Result<PeriodTotals> {
    let sum_of = |kind: TransactionType| {
        checked_sum(
            txns.iter()
                .filter(|t| t.transaction_type == kind)
                .map(|t| t.amount),
        )
    };
    Ok(PeriodTotals {
        income: sum_of(TransactionType::Income)?,
        expense: sum_of(TransactionType::Expense)?,
    })
}

/// Inclusive `(start_ms, end_ms)` of the rolling window ending at `now`.
pub(crate) fn period_window(period: StatisticsPeriod, now: DateTime<Local>) -> (i64, i64) {
    let months = Months::new(period.months());
    let start = now
        .checked_sub_months(months)
        .map(|d| d.timestamp_millis())
        // Local time can fall into a DST gap; UTC arithmetic always resolves.
        .or_else(|| {
            now.with_timezone(&Utc)
                .checked_sub_months(months)
                .map(|d| d.timestamp_millis())
        })
        .unwrap_or(i64::MIN);
    (start, now.timestamp_millis())
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthBucket {
    /// "YYYY-MM"
    pub(crate) key: String,
    /// Short axis label, e.g. "Oct 26".
    pub(crate) label: String,
    pub(crate) income: Decimal,
    /// Magnitude of spending, never negative.
    pub(crate) expense: Decimal,
}

/// One bucket per calendar month of `period`, oldest first, ending with the
/// month containing `now`. Transactions before the first bucket's midnight
/// or after `now` are ignored.
pub(crate) fn monthly_buckets(
    txns: &[Transaction],
    period: StatisticsPeriod,
    now: DateTime<Local>,
) -> Result<Vec<MonthBucket>> {
    let count = period.months();
    let this_month = first_of_month(now.date_naive());
    let first = this_month
        .checked_sub_months(Months::new(count - 1))
        .unwrap_or(this_month);

    let mut buckets: Vec<MonthBucket> = (0..count)
        .filter_map(|i| first.checked_add_months(Months::new(i)))
        .map(|month| MonthBucket {
            key: month.format("%Y-%m").to_string(),
            label: month.format("%b %y").to_string(),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();

    let start_ms = local_midnight_millis(first);
    let end_ms = now.timestamp_millis();

    for txn in txns
        .iter()
        .filter(|t| t.timestamp >= start_ms && t.timestamp <= end_ms)
    {
        let date = local_from_millis(txn.timestamp).date_naive();
        let Some(idx) = month_index(first, date) else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(idx) {
            match txn.transaction_type {
                TransactionType::Income => {
                    bucket.income = checked_sum([bucket.income, txn.amount])?;
                }
                TransactionType::Expense => {
                    bucket.expense = checked_sum([bucket.expense, txn.amount.abs()])?;
                }
            }
        }
    }

    Ok(buckets)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Months elapsed from `first` to `date`, or None when `date` is earlier.
fn month_index(first: NaiveDate, date: NaiveDate) -> Option<usize> {
    let diff = (date.year() - first.year()) * 12 + date.month() as i32 - first.month() as i32;
    usize::try_from(diff).ok()
}

fn local_midnight_millis(date: NaiveDate) -> i64 {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|d| d.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

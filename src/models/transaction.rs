use chrono::{DateTime, Local, TimeZone};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Stored form, matching the column values written since schema v1.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "i" | "+" => Some(Self::Income),
            "expense" | "out" | "e" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub(crate) fn toggle(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }

    /// Applies the sign convention: expenses are stored negative, income positive.
    pub(crate) fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Expense if amount > Decimal::ZERO => -amount,
            _ => amount,
        }
    }

    /// Fixed category list offered for this type.
    pub(crate) fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => super::category::INCOME_CATEGORIES,
            Self::Expense => super::category::EXPENSE_CATEGORIES,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) id: Option<i64>,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) transaction_type: TransactionType,
    /// Milliseconds since the Unix epoch.
    pub(crate) timestamp: i64,
    pub(crate) category: String,
    pub(crate) note: Option<String>,
}

impl Transaction {
    pub(crate) fn new(
        description: String,
        amount: Decimal,
        transaction_type: TransactionType,
        timestamp: i64,
        category: String,
        note: Option<String>,
    ) -> Self {
        Self {
            id: None,
            description,
            amount: transaction_type.signed(amount),
            transaction_type,
            timestamp,
            category,
            note: note.filter(|n| !n.trim().is_empty()),
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub(crate) fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

/// Local date-time of an epoch-millisecond timestamp; falls back to the epoch
/// for values chrono can't represent.
pub(crate) fn local_from_millis(ms: i64) -> DateTime<Local> {
    Local
        .timestamp_millis_opt(ms)
        .earliest()
        .unwrap_or_else(|| DateTime::<chrono::Utc>::UNIX_EPOCH.with_timezone(&Local))
}

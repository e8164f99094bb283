use chrono::Local;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{find_category, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Type,
    Category,
    Date,
    Note,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Description,
            Self::Amount,
            Self::Type,
            Self::Category,
            Self::Date,
            Self::Note,
        ]
    }

    /// Fields edited as free text rather than cycled with +/-.
    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Description | Self::Amount | Self::Date | Self::Note)
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Description => write!(f, "Description"),
            Self::Amount => write!(f, "Amount"),
            Self::Type => write!(f, "Type"),
            Self::Category => write!(f, "Category"),
            Self::Date => write!(f, "Date"),
            Self::Note => write!(f, "Note"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum FormError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Enter a valid positive amount")]
    InvalidAmount,
    #[error("Amount cannot exceed 1,000,000,000,000")]
    AmountTooLarge,
    #[error("Choose a category")]
    MissingCategory,
    #[error("'{name}' is not a valid {kind} category")]
    UnknownCategory { name: String, kind: TransactionType },
}

impl FormError {
    pub(crate) fn field(&self) -> FormField {
        match self {
            Self::EmptyDescription => FormField::Description,
            Self::InvalidAmount | Self::AmountTooLarge => FormField::Amount,
            Self::MissingCategory | Self::UnknownCategory { .. } => FormField::Category,
        }
    }
}

/// Every failing field of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(.0))]
pub(crate) struct ValidationErrors(pub(crate) Vec<FormError>);

impl ValidationErrors {
    pub(crate) fn for_field(&self, field: FormField) -> Option<&FormError> {
        self.0.iter().find(|e| e.field() == field)
    }
}

fn join_errors(errors: &[FormError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Largest accepted amount, in whole currency units.
const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Parses user-entered amount text. Accepts a comma as the decimal separator.
pub(crate) fn parse_amount(text: &str) -> Option<Decimal> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Raw field values of the add-transaction form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionForm {
    pub(crate) description: String,
    pub(crate) amount_text: String,
    pub(crate) transaction_type: TransactionType,
    pub(crate) category: String,
    pub(crate) note: Option<String>,
    /// Epoch milliseconds of the chosen date.
    pub(crate) date: i64,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount_text: String::new(),
            transaction_type: TransactionType::Expense,
            category: String::new(),
            note: None,
            date: Local::now().timestamp_millis(),
        }
    }
}

impl TransactionForm {
    pub(crate) fn validate(&self) -> Result<Decimal, ValidationErrors> {
        let mut errors = Vec::new();

        if self.description.trim().is_empty() {
            errors.push(FormError::EmptyDescription);
        }

        let amount = match parse_amount(&self.amount_text) {
            Some(a) if a > Decimal::ZERO && a <= Decimal::from(MAX_AMOUNT) => Some(a),
            Some(a) if a > Decimal::ZERO => {
                errors.push(FormError::AmountTooLarge);
                None
            }
            _ => {
                errors.push(FormError::InvalidAmount);
                None
            }
        };

        if self.category.trim().is_empty() {
            errors.push(FormError::MissingCategory);
        } else if find_category(self.transaction_type, &self.category).is_none() {
            errors.push(FormError::UnknownCategory {
                name: self.category.clone(),
                kind: self.transaction_type,
            });
        }

        match amount {
            Some(a) if errors.is_empty() => Ok(a),
            _ => Err(ValidationErrors(errors)),
        }
    }

    /// Validated record ready for insertion; expenses come out negative.
    pub(crate) fn to_transaction(&self) -> Result<Transaction, ValidationErrors> {
        let amount = self.validate()?;
        let category = find_category(self.transaction_type, &self.category)
            .unwrap_or(self.category.as_str())
            .to_string();
        Ok(Transaction::new(
            self.description.trim().to_string(),
            amount,
            self.transaction_type,
            self.date,
            category,
            self.note.clone(),
        ))
    }
}

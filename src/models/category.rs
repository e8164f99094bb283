use super::TransactionType;

pub(crate) const EXPENSE_CATEGORIES: &[&str] =
    &["Groceries", "Transport", "Housing", "Entertainment", "Other"];

pub(crate) const INCOME_CATEGORIES: &[&str] = &["Salary", "Gift", "Other"];

/// Find a category by name (case-insensitive) in the list for `kind`,
/// returning its canonical spelling.
pub(crate) fn find_category(kind: TransactionType, name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    kind.categories()
        .iter()
        .copied()
        .find(|c| c.to_lowercase() == lower)
}

/// Step through the category list for `kind`, wrapping at both ends.
/// An empty or unknown `current` starts at the first (or last) entry.
pub(crate) fn cycle_category(kind: TransactionType, current: &str, delta: i32) -> &'static str {
    let list = kind.categories();
    let len = list.len() as i32;
    let next = match list.iter().position(|c| *c == current) {
        Some(idx) => (idx as i32 + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    list[next as usize]
}

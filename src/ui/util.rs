use chrono::{Duration, Months, NaiveDate, TimeZone};
use rust_decimal::Decimal;

use crate::models::local_from_millis;

/// Format a decimal amount with thousand separators, 2 decimal places and a
/// trailing currency symbol, e.g. `-1234.5` → `"-1,234.50 €"`.
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO && !abs.is_zero() { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{with_commas}.{dec_part}")
    } else {
        format!("{sign}{with_commas}.{dec_part} {symbol}")
    }
}

/// Local date of an epoch-millisecond timestamp rendered with a strftime pattern.
pub(crate) fn format_date(timestamp_ms: i64, fmt: &str) -> String {
    local_from_millis(timestamp_ms).format(fmt).to_string()
}

/// Parse a user-typed date with the configured pattern, falling back to ISO.
pub(crate) fn parse_date(input: &str, fmt: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, fmt)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .ok()
}

/// Move `timestamp_ms` onto `date`, keeping its local time of day.
pub(crate) fn with_date(timestamp_ms: i64, date: NaiveDate) -> i64 {
    let current = local_from_millis(timestamp_ms);
    let naive = date.and_time(current.time());
    chrono::Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|d| d.timestamp_millis())
        .unwrap_or(timestamp_ms)
}

/// Shift a timestamp by whole days (calendar-aware, local time).
pub(crate) fn shift_days(timestamp_ms: i64, days: i64) -> i64 {
    let date = local_from_millis(timestamp_ms).date_naive();
    match date.checked_add_signed(Duration::days(days)) {
        Some(d) => with_date(timestamp_ms, d),
        None => timestamp_ms,
    }
}

/// Shift a timestamp by whole months, clamping the day to the target month.
pub(crate) fn shift_months(timestamp_ms: i64, months: i32) -> i64 {
    let date = local_from_millis(timestamp_ms).date_naive();
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    match shifted {
        Some(d) => with_date(timestamp_ms, d),
        None => timestamp_ms,
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Scrolls just enough that `index` sits inside a window of `page` rows.
pub(crate) fn keep_in_view(index: usize, scroll: &mut usize, page: usize) {
    if page > 0 && index >= *scroll + page {
        *scroll = index + 1 - page;
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Pull a cursor back inside a list that may have shrunk.
pub(crate) fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if len == 0 {
        *index = 0;
        *scroll = 0;
        return;
    }
    if *index >= len {
        *index = len - 1;
    }
    if *scroll > *index {
        *scroll = *index;
    }
}

#![allow(clippy::unwrap_used)]

use chrono::{Local, NaiveDate, TimeZone, Timelike};
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::local_from_millis;

fn local_ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .earliest()
        .unwrap()
        .timestamp_millis()
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Groceries", 20), "Groceries");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Monthly rent payment", 8), "Monthly…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Salary", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("Café au lait", 5), "Café…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("Bus", 1), "…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_euro_suffix() {
    assert_eq!(format_amount(dec!(1234.56), "€"), "1,234.56 €");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-12.5), "€"), "-12.50 €");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0), "€"), "0.00 €");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.891), "$"), "1,234,567.89 $");
}

#[test]
fn test_format_amount_no_symbol() {
    assert_eq!(format_amount(dec!(-99999.01), ""), "-99,999.01");
}

#[test]
fn test_format_amount_tiny_negative_rounds_to_zero() {
    assert_eq!(format_amount(dec!(-0.001), "€"), "0.00 €");
}

// ── dates ──────────────────────────────────────────────────

#[test]
fn test_format_date_default_pattern() {
    assert_eq!(format_date(local_ms(2026, 3, 7, 15, 30), "%d.%m.%Y"), "07.03.2026");
}

#[test]
fn test_parse_date_configured_and_iso() {
    let expected = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
    assert_eq!(parse_date("07.03.2026", "%d.%m.%Y"), Some(expected));
    assert_eq!(parse_date(" 2026-03-07 ", "%d.%m.%Y"), Some(expected));
    assert_eq!(parse_date("7 March", "%d.%m.%Y"), None);
}

#[test]
fn test_with_date_keeps_time_of_day() {
    let ts = with_date(
        local_ms(2026, 10, 19, 18, 45),
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
    );
    let dt = local_from_millis(ts);
    assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
    assert_eq!((dt.hour(), dt.minute()), (18, 45));
}

#[test]
fn test_shift_days_crosses_month() {
    let ts = shift_days(local_ms(2026, 2, 28, 12, 0), 1);
    assert_eq!(
        local_from_millis(ts).date_naive(),
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    );
    let back = shift_days(ts, -1);
    assert_eq!(back, local_ms(2026, 2, 28, 12, 0));
}

#[test]
fn test_shift_months_clamps_day() {
    let ts = shift_months(local_ms(2026, 1, 31, 12, 0), 1);
    assert_eq!(
        local_from_millis(ts).date_naive(),
        NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
    );
    let ts = shift_months(local_ms(2026, 1, 15, 12, 0), -2);
    assert_eq!(
        local_from_millis(ts).date_naive(),
        NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
    );
}

// ── scrolling ──────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!((index, scroll), (19, 15));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_cursor_after_shrink() {
    let (mut index, mut scroll) = (7, 5);
    clamp_cursor(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));
    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}

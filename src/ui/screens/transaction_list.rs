use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Transaction;
use crate::settings::Settings;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, truncate};

/// Cursor state for one rendered list.
pub(crate) struct ListCursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

/// Rows that fit in a table drawn into `area` (borders and header excluded).
pub(crate) fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

/// Newest-first transaction table shared by the overview and statistics screens.
pub(crate) fn render(
    f: &mut Frame,
    area: Rect,
    title: &str,
    txns: &[Transaction],
    cursor: ListCursor,
    settings: &Settings,
    empty_message: &str,
) {
    let block = theme::panel_block(format!("{title} ({})", txns.len()));

    if txns.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(empty_message.to_string(), theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Note", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = txns
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(visible_rows(area))
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount, &settings.currency_symbol));

            let style = if i == cursor.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format_date(txn.timestamp, &settings.date_format)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(txn.category.clone()),
                Cell::from(Span::styled(
                    truncate(txn.note.as_deref().unwrap_or(""), 30),
                    theme::dim_style(),
                )),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(15),
        Constraint::Min(10),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

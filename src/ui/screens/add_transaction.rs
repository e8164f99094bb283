use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::TransactionType;
use crate::ui::app::{App, InputMode};
use crate::ui::theme;
use crate::viewmodel::FormField;

const LABEL_WIDTH: usize = 14;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Form
            Constraint::Length(4), // Key hints
        ])
        .split(area);

    let current = app.current_field();
    let mut lines = vec![Line::from("")];
    for &field in FormField::all() {
        lines.push(field_line(app, field, field == current));
        if let Some(err) = app.form_errors.as_ref().and_then(|e| e.for_field(field)) {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_WIDTH + 2)),
                Span::styled(err.to_string(), theme::error_style()),
            ]));
        }
        if field == current && field == FormField::Category {
            lines.push(category_choices(app));
        }
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(theme::panel_block("New Transaction"));
    f.render_widget(form, chunks[0]);

    let hints = Paragraph::new(vec![
        Line::from(Span::styled(
            " j/k field · Enter edit · +/- change type, category or date (H/L month)",
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            " Ctrl-s save · :discard clear · Esc back",
            theme::dim_style(),
        )),
    ])
    .block(theme::panel_block("Keys"));
    f.render_widget(hints, chunks[1]);
}

fn field_line(app: &App, field: FormField, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };

    let editing = focused && app.input_mode == InputMode::Editing;
    let value = if editing {
        format!("{}█", app.edit_buffer)
    } else {
        app.field_value(field)
    };

    let value_span = match field {
        FormField::Type => {
            let style = match app.vm.form().transaction_type {
                TransactionType::Income => theme::income_style(),
                TransactionType::Expense => theme::expense_style(),
            };
            Span::styled(format!("‹ {value} ›"), style.add_modifier(Modifier::BOLD))
        }
        FormField::Category if value.is_empty() => {
            Span::styled("‹ choose ›".to_string(), theme::dim_style())
        }
        FormField::Category => Span::styled(format!("‹ {value} ›"), theme::normal_style()),
        _ if editing => Span::styled(value, theme::command_bar_style()),
        _ if value.is_empty() => Span::styled("—".to_string(), theme::dim_style()),
        _ => Span::styled(value, theme::normal_style()),
    };

    Line::from(vec![
        Span::styled(marker.to_string(), label_style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.to_string()), label_style),
        value_span,
    ])
}

/// The category list for the current type, with the chosen one highlighted.
fn category_choices(app: &App) -> Line<'static> {
    let form = app.vm.form();
    let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH + 2))];
    for (i, name) in form.transaction_type.categories().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", theme::dim_style()));
        }
        let style = if name.eq_ignore_ascii_case(form.category.trim()) {
            theme::selected_style()
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(name.to_string(), style));
    }
    Line::from(spans)
}

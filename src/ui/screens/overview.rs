use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::transaction_list::{self, ListCursor};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

/// Balance card on top, transaction list below.
fn split(area: Rect) -> [Rect; 2] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .areas(area)
}

pub(crate) fn list_area(area: Rect) -> Rect {
    split(area)[1]
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let [balance, list] = split(area);

    render_balance(f, balance, app);
    transaction_list::render(
        f,
        list,
        "Transactions",
        app.vm.all_transactions(),
        ListCursor {
            index: app.transaction_index,
            scroll: app.transaction_scroll,
        },
        &app.settings,
        "No transactions yet. Press a to add one.",
    );
}

fn render_balance(f: &mut Frame, area: Rect, app: &App) {
    let balance = app.vm.total_balance();
    let txns = app.vm.all_transactions();
    let income_count = txns.iter().filter(|t| t.is_income()).count();
    let expense_count = txns.iter().filter(|t| t.is_expense()).count();

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(balance, &app.settings.currency_symbol),
            Style::default()
                .fg(theme::amount_color(balance))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{income_count} income · {expense_count} expenses"),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(theme::panel_block("Current Balance"));

    f.render_widget(text, area);
}

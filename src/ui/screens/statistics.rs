use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Tabs},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::transaction_list::{self, ListCursor};
use crate::models::StatisticsPeriod;
use crate::stats::MonthBucket;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

/// Period selector, summary cards, monthly chart, then the in-period list.
fn split(area: Rect) -> [Rect; 4] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Percentage(50),
            Constraint::Min(5),
        ])
        .areas(area)
}

pub(crate) fn list_area(area: Rect) -> Rect {
    split(area)[3]
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let [tabs, summary, chart, list] = split(area);

    render_period_tabs(f, tabs, app.vm.statistics_period());
    render_summary(f, summary, app);
    render_chart(f, chart, app);
    transaction_list::render(
        f,
        list,
        "In Period",
        app.vm.transactions_for_statistics(),
        ListCursor {
            index: app.stats_index,
            scroll: app.stats_scroll,
        },
        &app.settings,
        "No transactions in this period",
    );
}

fn render_period_tabs(f: &mut Frame, area: Rect, current: StatisticsPeriod) {
    let titles: Vec<Line> = StatisticsPeriod::all()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let style = if *p == current {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            };
            Line::from(Span::styled(format!("{}:{p}", i + 1), style))
        })
        .collect();

    let selected = StatisticsPeriod::all()
        .iter()
        .position(|p| *p == current)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(tabs, area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let symbol = &app.settings.currency_symbol;
    let balance = app.vm.period_balance();

    render_card(f, cards[0], "Income", app.vm.total_income_for_period(), theme::GREEN, symbol);
    render_card(
        f,
        cards[1],
        "Expenses",
        app.vm.total_expense_for_period().abs(),
        theme::RED,
        symbol,
    );
    render_card(f, cards[2], "Balance", balance, theme::amount_color(balance), symbol);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, symbol: &str) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount, symbol),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(theme::panel_block(title));

    f.render_widget(text, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let buckets = app.vm.monthly_buckets();
    let block = theme::panel_block(format!(
        "Income vs Expenses · {}",
        app.vm.statistics_period()
    ));

    if buckets.is_empty() || buckets.iter().all(MonthBucket::is_empty) {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No data for the selected period",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bar_width = bar_width_for(area.width, buckets.len());
    let symbol = &app.settings.currency_symbol;

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2)
        .value_style(Style::default().fg(theme::HEADER_BG));

    for bucket in buckets {
        let bars = [
            bar(bucket.income, theme::GREEN, symbol, bar_width),
            bar(bucket.expense, theme::RED, symbol, bar_width),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(bucket.label.clone()).centered())
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

fn bar(amount: Decimal, color: Color, symbol: &str, width: u16) -> Bar<'static> {
    let value = amount.round().to_u64().unwrap_or(0);
    let text = format_amount(amount, symbol);
    let bar = Bar::default()
        .value(value)
        .style(Style::default().fg(color));
    // Values that don't fit the bar are hidden rather than truncated.
    if text.chars().count() <= width as usize {
        bar.text_value(text)
    } else {
        bar.text_value(String::new())
    }
}

/// Two bars per month plus the gap between groups, inside the panel borders.
fn bar_width_for(area_width: u16, groups: usize) -> u16 {
    let groups = groups.max(1) as u16;
    let inner = area_width.saturating_sub(2);
    let per_group = inner / groups;
    (per_group.saturating_sub(2) / 2).clamp(1, 12)
}

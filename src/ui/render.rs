use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

/// Tab bar, screen body, status bar, command bar.
fn split_frame(area: Rect) -> [Rect; 4] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area)
}

/// Table rows the current screen's list shows in a frame of size `area`.
pub(crate) fn list_rows(screen: Screen, area: Rect) -> usize {
    let [_, body, _, _] = split_frame(area);
    let list = match screen {
        Screen::Overview => super::screens::overview::list_area(body),
        Screen::Statistics => super::screens::statistics::list_area(body),
        Screen::AddTransaction => return 0,
    };
    super::screens::transaction_list::visible_rows(list)
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = split_frame(f.area());

    render_tab_bar(f, tabs, app.screen);
    match app.screen {
        Screen::Overview => super::screens::overview::render(f, body, app),
        Screen::AddTransaction => super::screens::add_transaction::render(f, body, app),
        Screen::Statistics => super::screens::statistics::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, current: Screen) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .map(|s| {
            let style = if *s == current {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            Line::from(Span::styled(s.to_string(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(tabs, area);
}

fn mode_color(mode: InputMode) -> Color {
    match mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    }
}

fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Overview => " a add | D delete | C clear all | s stats | ? help ",
        Screen::AddTransaction => " Enter edit | +/- change | Ctrl-s save | Esc back ",
        Screen::Statistics => " 1/2/3 period | [/] cycle | D delete | Esc back ",
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode = format!(" {} ", app.input_mode);
    let info = format!(
        " {} txns | balance {} | stats {}",
        app.vm.all_transactions().len(),
        super::util::format_amount(app.vm.total_balance(), &app.settings.currency_symbol),
        app.vm.statistics_period()
    );
    let hints = key_hints(app.screen);

    let used = mode.chars().count() + info.chars().count() + hints.chars().count();
    let pad = (area.width as usize).saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(mode_color(app.input_mode))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(hints, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

/// Bottom line: the `:` prompt, the field editor, a y/N question, or the last status.
fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (line, cursor) = match app.input_mode {
        InputMode::Command => prompt_line(":".to_string(), theme::ACCENT, &app.command_input),
        InputMode::Editing => prompt_line(
            format!("{}> ", app.current_field()),
            theme::GREEN,
            &app.edit_buffer,
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(app.confirm_message.clone(), Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::from(Span::styled(
                " Press : for commands, ? for help",
                theme::dim_style(),
            )),
            None,
        ),
        InputMode::Normal => (
            Line::from(Span::styled(
                format!(" {}", app.status_message),
                theme::command_bar_style(),
            )),
            None,
        ),
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );
    if let Some(offset) = cursor {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn prompt_line(prompt: String, color: Color, input: &str) -> (Line<'static>, Option<u16>) {
    let offset = (prompt.chars().count() + input.chars().count()) as u16;
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(color)),
        Span::styled(input.to_string(), theme::command_bar_style()),
    ]);
    (line, Some(offset))
}

const KEY_HELP: &[(&str, &[&str])] = &[
    (
        "Anywhere",
        &[
            "Tab/Shift-Tab  next/previous screen    :        command mode",
            "?              this help               Ctrl-q   quit",
        ],
    ),
    (
        "Lists",
        &[
            "j/k, Up/Down   move                    g/G      top/bottom",
            "Ctrl-d/u       half page               D        delete selected",
            "a / s          add form / statistics   C        clear all (main list)",
        ],
    ),
    (
        "Add form",
        &[
            "j/k            next/previous field     Enter    edit text field",
            "+/-            type, category, date    H/L      date -/+ one month",
            "Ctrl-s         save                    Esc      back without saving",
        ],
    ),
    (
        "Statistics",
        &["1/2/3          1 month, 6 months, 1 year   [/]  previous/next period"],
    ),
];

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let heading = Style::default()
        .fg(theme::YELLOW)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            " WalleTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (section, rows) in KEY_HELP {
        lines.push(Line::from(Span::styled(format!(" {section}"), heading)));
        lines.extend(
            rows.iter()
                .map(|r| Line::from(Span::styled(format!("  {r}"), theme::normal_style()))),
        );
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(" Commands", heading)));
    let mut cmds: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    cmds.sort_unstable();
    cmds.dedup_by_key(|(_, desc)| *desc);
    lines.extend(cmds.iter().map(|(name, desc)| {
        Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        ))
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Press any key to close ", theme::dim_style())));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 76.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}

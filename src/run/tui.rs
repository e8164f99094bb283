use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;

use crate::db::Database;
use crate::models::StatisticsPeriod;
use crate::settings::Settings;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &Database, settings: &Settings) -> Result<()> {
    let mut app = App::new(settings.clone());
    app.refresh(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    while app.running {
        app.refresh(db)?;
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &mut App) {
    app.set_list_rows(crate::ui::render::list_rows(app.screen, f.area()));
    crate::ui::render::render(f, app);
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Keys shared by every screen.
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
            return Ok(());
        }
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
            app.running = false;
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return Ok(());
        }
        KeyCode::Tab => {
            cycle_screen(app, 1);
            return Ok(());
        }
        KeyCode::BackTab => {
            cycle_screen(app, -1);
            return Ok(());
        }
        _ => {}
    }

    match app.screen {
        Screen::Overview => handle_overview_input(key, app),
        Screen::AddTransaction => handle_form_input(key, app, db)?,
        Screen::Statistics => handle_statistics_input(key, app),
    }
    Ok(())
}

fn handle_overview_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('a') => app.switch_screen(Screen::AddTransaction),
        KeyCode::Char('s') => app.switch_screen(Screen::Statistics),
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('C') => app.request_clear_all(),
        _ => handle_list_motion(key, app),
    }
}

fn handle_statistics_input(key: event::KeyEvent, app: &mut App) {
    let current = app.vm.statistics_period();
    match key.code {
        KeyCode::Char('1') => app.set_period(StatisticsPeriod::LastMonth),
        KeyCode::Char('2') => app.set_period(StatisticsPeriod::LastSixMonths),
        KeyCode::Char('3') => app.set_period(StatisticsPeriod::LastYear),
        KeyCode::Char(']') | KeyCode::Right => app.set_period(current.next()),
        KeyCode::Char('[') | KeyCode::Left => app.set_period(current.prev()),
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('a') => app.switch_screen(Screen::AddTransaction),
        KeyCode::Esc => app.switch_screen(Screen::Overview),
        _ => handle_list_motion(key, app),
    }
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => app.submit_form(db)?,
        KeyCode::Char('j') | KeyCode::Down => app.next_field(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_field(),
        KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.adjust_field(1),
        KeyCode::Char('-') | KeyCode::Left => app.adjust_field(-1),
        KeyCode::Char('L') => app.shift_form_month(1),
        KeyCode::Char('H') => app.shift_form_month(-1),
        KeyCode::Esc => app.switch_screen(Screen::Overview),
        _ => {}
    }
    Ok(())
}

fn handle_list_motion(key: event::KeyEvent, app: &mut App) {
    let page = app.list_rows;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let (len, index, scroll) = match app.screen {
        Screen::Overview => (
            app.vm.all_transactions().len(),
            &mut app.transaction_index,
            &mut app.transaction_scroll,
        ),
        Screen::Statistics => (
            app.vm.transactions_for_statistics().len(),
            &mut app.stats_index,
            &mut app.stats_scroll,
        ),
        Screen::AddTransaction => return,
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => scroll_down(index, scroll, len, page),
        KeyCode::Char('k') | KeyCode::Up => scroll_up(index, scroll),
        KeyCode::Char('g') | KeyCode::Home => scroll_to_top(index, scroll),
        KeyCode::Char('G') | KeyCode::End => scroll_to_bottom(index, scroll, len, page),
        KeyCode::Char('d') if ctrl => {
            for _ in 0..page / 2 {
                scroll_down(index, scroll, len, page);
            }
        }
        KeyCode::Char('u') if ctrl => {
            for _ in 0..page / 2 {
                scroll_up(index, scroll);
            }
        }
        _ => {}
    }
}

fn cycle_screen(app: &mut App, delta: isize) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let len = screens.len() as isize;
    let next = (idx + delta).rem_euclid(len) as usize;
    app.switch_screen(screens[next]);
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Tab => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.clear();
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(db)?,
        _ => app.cancel_pending(),
    }
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;

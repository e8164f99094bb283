use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::db::Database;
use crate::models::StatisticsPeriod;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit WalleTUI", cmd_quit, r);
    register_command!("quit", "Quit WalleTUI", cmd_quit, r);
    register_command!("m", "Go to the transaction list", cmd_main, r);
    register_command!("main", "Go to the transaction list", cmd_main, r);
    register_command!("a", "Add a transaction", cmd_add, r);
    register_command!("add", "Add a transaction", cmd_add, r);
    register_command!("s", "Go to Statistics", cmd_stats, r);
    register_command!("stats", "Go to Statistics", cmd_stats, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "period",
        "Set statistics period (e.g. :period 6m)",
        cmd_period,
        r
    );
    register_command!("p", "Set statistics period (e.g. :p 1y)", cmd_period, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!(
        "clear-all",
        "Delete every transaction",
        cmd_clear_all,
        r
    );
    register_command!("w", "Save the transaction form", cmd_save, r);
    register_command!("save", "Save the transaction form", cmd_save, r);
    register_command!("discard", "Clear the transaction form", cmd_discard, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let (name, args) = match input.trim().split_once(' ') {
        Some((name, rest)) => (name, rest.trim()),
        None => (input.trim(), ""),
    };

    match COMMANDS.get(name) {
        Some(cmd) => {
            tracing::debug!(command = name, "running command");
            (cmd.run)(args, app, db)
        }
        None => {
            app.set_status(format!(
                "Unknown command :{name}, did you mean :{}?",
                find_closest(name)
            ));
            Ok(())
        }
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_main(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::Overview);
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::AddTransaction);
    Ok(())
}

fn cmd_stats(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::Statistics);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_period(args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = app.vm.statistics_period();
        app.set_status(format!(
            "Statistics period: {current} (use :period 1m|6m|1y)"
        ));
        return Ok(());
    }
    match StatisticsPeriod::parse(args) {
        Some(period) => {
            app.set_period(period);
            app.switch_screen(Screen::Statistics);
        }
        None => app.set_status(format!("Unknown period '{args}'. Use 1m, 6m or 1y")),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    if app.screen == Screen::AddTransaction {
        app.set_status("Select a transaction in the list first");
        return Ok(());
    }
    app.request_delete_selected();
    Ok(())
}

fn cmd_clear_all(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.request_clear_all();
    Ok(())
}

fn cmd_save(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    if app.screen != Screen::AddTransaction {
        app.set_status("Nothing to save. Use :add to open the form");
        return Ok(());
    }
    app.submit_form(db)
}

fn cmd_discard(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.discard_form();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("stats", "stats"), 0);
        assert_eq!(levenshtein("stat", "stats"), 1);
        assert_eq!(levenshtein("", "add"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_closest_suggests_full_name() {
        assert_eq!(find_closest("stts"), "stats");
        assert_eq!(find_closest("perod"), "period");
        assert_eq!(find_closest("clear"), "clear-all");
    }

    #[test]
    fn test_every_alias_has_description() {
        assert!(COMMANDS.values().all(|c| !c.description.is_empty()));
        for name in ["add", "stats", "main", "period", "delete", "clear-all", "help", "quit"] {
            assert!(COMMANDS.contains_key(name), "missing :{name}");
        }
    }
}

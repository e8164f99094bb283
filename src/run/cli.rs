use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::db::Database;
use crate::models::{StatisticsPeriod, Transaction, TransactionType};
use crate::settings::Settings;
use crate::ui::util::{format_amount, format_date, parse_date, truncate, with_date};
use crate::viewmodel::TransactionViewModel;

#[derive(Parser)]
#[command(
    name = "walletui",
    version,
    about = "WalleTUI - a local-only personal income and expense tracker.",
    long_about = "WalleTUI - a local-only personal income and expense tracker.\n\nRun without a command to open the interactive TUI."
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Record a transaction.
    Add {
        /// What the money was for
        description: String,
        /// Positive amount; expenses are stored negative
        amount: String,
        /// income or expense
        #[arg(long = "type", short = 't', default_value = "expense")]
        kind: String,
        /// Category from the type's list (see `walletui categories`)
        #[arg(long, short)]
        category: String,
        /// Date in the configured format or YYYY-MM-DD (default: now)
        #[arg(long, short)]
        date: Option<String>,
        #[arg(long, short)]
        note: Option<String>,
    },
    /// List transactions, newest first.
    List {
        /// Only show a statistics period: 1m, 6m or 1y
        #[arg(long, short)]
        period: Option<String>,
        /// Show at most this many rows
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Print the running balance of all transactions.
    Balance,
    /// Income, expenses and monthly breakdown for a period.
    Stats {
        /// 1m, 6m or 1y (default from settings)
        #[arg(long, short)]
        period: Option<String>,
    },
    /// Delete one transaction by id.
    Delete { id: i64 },
    /// Change fields of an existing transaction.
    Edit {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        /// income or expense; changing it requires --category
        #[arg(long = "type", short = 't')]
        kind: Option<String>,
        #[arg(long, short)]
        category: Option<String>,
        #[arg(long, short)]
        date: Option<String>,
        /// Empty string removes the note
        #[arg(long, short)]
        note: Option<String>,
    },
    /// Delete every transaction. Cannot be undone.
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show the categories offered for each type.
    Categories {
        /// income or expense
        #[arg(long = "type", short = 't')]
        kind: Option<String>,
    },
}

pub(crate) fn as_cli(command: Commands, db: &Database, settings: &Settings) -> Result<()> {
    match command {
        Commands::Add {
            description,
            amount,
            kind,
            category,
            date,
            note,
        } => cli_add(db, settings, &description, &amount, &kind, &category, date, note),
        Commands::List { period, limit } => cli_list(db, settings, period.as_deref(), limit),
        Commands::Balance => cli_balance(db, settings),
        Commands::Stats { period } => cli_stats(db, settings, period.as_deref()),
        Commands::Delete { id } => cli_delete(db, id),
        Commands::Edit {
            id,
            description,
            amount,
            kind,
            category,
            date,
            note,
        } => cli_edit(
            db,
            settings,
            id,
            EditArgs {
                description,
                amount,
                kind,
                category,
                date,
                note,
            },
        ),
        Commands::Clear { yes } => cli_clear(db, yes),
        Commands::Categories { kind } => cli_categories(kind.as_deref()),
    }
}

fn parse_kind(s: &str) -> Result<TransactionType> {
    TransactionType::parse(s)
        .ok_or_else(|| anyhow::anyhow!("Unknown type '{s}'. Use income or expense"))
}

fn parse_period(s: Option<&str>, settings: &Settings) -> Result<StatisticsPeriod> {
    match s {
        None => Ok(settings.period()),
        Some(p) => StatisticsPeriod::parse(p)
            .ok_or_else(|| anyhow::anyhow!("Unknown period '{p}'. Use 1m, 6m or 1y")),
    }
}

fn apply_date(vm: &mut TransactionViewModel, input: &str, settings: &Settings) -> Result<()> {
    let date = parse_date(input, &settings.date_format).with_context(|| {
        format!(
            "Invalid date '{input}'. Use {} or YYYY-MM-DD",
            settings.date_format
        )
    })?;
    let ts = with_date(vm.form().date, date);
    vm.set_selected_date(ts);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cli_add(
    db: &Database,
    settings: &Settings,
    description: &str,
    amount: &str,
    kind: &str,
    category: &str,
    date: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let mut vm = TransactionViewModel::new(settings.period());
    vm.set_transaction_type(parse_kind(kind)?);
    vm.set_description(description);
    vm.set_amount_text(amount);
    vm.set_selected_category(category);
    if let Some(note) = note {
        vm.set_note(&note);
    }
    if let Some(date) = date {
        apply_date(&mut vm, &date, settings)?;
    }

    let id = vm.add_transaction_from_form(db)?;
    let txn = db
        .get_transaction_by_id(id)?
        .with_context(|| format!("Transaction {id} vanished after insert"))?;
    println!(
        "Added #{id}: {} {} ({})",
        txn.description,
        format_amount(txn.amount, &settings.currency_symbol),
        txn.category
    );
    Ok(())
}

fn print_table(txns: &[Transaction], settings: &Settings) {
    println!(
        "{:<5} {:<12} {:<28} {:<14} {:>16}  Note",
        "ID", "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(84));
    for txn in txns {
        println!(
            "{:<5} {:<12} {:<28} {:<14} {:>16}  {}",
            txn.id.unwrap_or(0),
            format_date(txn.timestamp, &settings.date_format),
            truncate(&txn.description, 28),
            truncate(&txn.category, 14),
            format_amount(txn.amount, &settings.currency_symbol),
            txn.note.as_deref().unwrap_or(""),
        );
    }
}

fn cli_list(db: &Database, settings: &Settings, period: Option<&str>, limit: Option<usize>) -> Result<()> {
    // Skips the aggregates so oversized rows can still be listed and deleted.
    let txns = match period {
        Some(_) => {
            let mut vm = TransactionViewModel::new(parse_period(period, settings)?);
            vm.sync(db, Local::now())?;
            vm.transactions_for_statistics().to_vec()
        }
        None => db.get_all_transactions()?,
    };
    if txns.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }
    let shown = &txns[..limit.unwrap_or(txns.len()).min(txns.len())];
    print_table(shown, settings);
    if shown.len() < txns.len() {
        println!("… {} more", txns.len() - shown.len());
    }
    Ok(())
}

fn cli_balance(db: &Database, settings: &Settings) -> Result<()> {
    let mut vm = TransactionViewModel::new(settings.period());
    vm.sync(db, Local::now())?;
    let count = db.get_transaction_count()?;
    println!(
        "Balance: {} ({count} transactions)",
        format_amount(vm.total_balance(), &settings.currency_symbol)
    );
    Ok(())
}

fn cli_stats(db: &Database, settings: &Settings, period: Option<&str>) -> Result<()> {
    let period = parse_period(period, settings)?;
    let mut vm = TransactionViewModel::new(period);
    vm.sync(db, Local::now())?;
    let symbol = &settings.currency_symbol;

    println!("WalleTUI: last {period}");
    if let Some((start, end)) = vm.statistics_window() {
        println!(
            "  {} to {}",
            format_date(start, &settings.date_format),
            format_date(end, &settings.date_format)
        );
    }
    println!("{}", "─".repeat(40));
    println!(
        "  Income:     {}",
        format_amount(vm.total_income_for_period(), symbol)
    );
    println!(
        "  Expenses:   {}",
        format_amount(vm.total_expense_for_period().abs(), symbol)
    );
    println!("  Balance:    {}", format_amount(vm.period_balance(), symbol));
    println!("  Txns:       {}", vm.transactions_for_statistics().len());

    println!();
    println!("{:<10} {:>16} {:>16}", "Month", "Income", "Expenses");
    for bucket in vm.monthly_buckets() {
        println!(
            "{:<10} {:>16} {:>16}",
            bucket.label,
            format_amount(bucket.income, symbol),
            format_amount(bucket.expense, symbol)
        );
    }
    Ok(())
}

fn cli_delete(db: &Database, id: i64) -> Result<()> {
    let txn = db
        .get_transaction_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {id} not found"))?;
    let vm = TransactionViewModel::new(StatisticsPeriod::default());
    vm.delete_transaction(db, id)?;
    println!("Deleted #{id}: {}", txn.description);
    Ok(())
}

struct EditArgs {
    description: Option<String>,
    amount: Option<String>,
    kind: Option<String>,
    category: Option<String>,
    date: Option<String>,
    note: Option<String>,
}

fn cli_edit(db: &Database, settings: &Settings, id: i64, args: EditArgs) -> Result<()> {
    let existing = db
        .get_transaction_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {id} not found"))?;

    let mut vm = TransactionViewModel::new(settings.period());
    vm.load_form(&existing);

    if let Some(kind) = args.kind {
        let kind = parse_kind(&kind)?;
        if kind != existing.transaction_type {
            vm.set_transaction_type(kind);
        }
    }
    if let Some(description) = args.description {
        vm.set_description(description);
    }
    if let Some(amount) = args.amount {
        vm.set_amount_text(amount);
    }
    if let Some(category) = args.category {
        vm.set_selected_category(category);
    }
    if let Some(date) = args.date {
        apply_date(&mut vm, &date, settings)?;
    }
    if let Some(note) = args.note {
        vm.set_note(&note);
    }

    if !vm.update_transaction_from_form(db, id)? {
        anyhow::bail!("Transaction {id} not found");
    }
    println!("Updated #{id}");
    Ok(())
}

fn cli_clear(db: &Database, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("This deletes every transaction and cannot be undone. Re-run with --yes");
    }
    let vm = TransactionViewModel::new(StatisticsPeriod::default());
    let count = vm.delete_all_transactions(db)?;
    println!("Deleted {count} transactions");
    Ok(())
}

fn cli_categories(kind: Option<&str>) -> Result<()> {
    let kinds = match kind {
        Some(k) => vec![parse_kind(k)?],
        None => vec![TransactionType::Expense, TransactionType::Income],
    };
    for kind in kinds {
        println!("{kind}:");
        for name in kind.categories() {
            println!("  {name}");
        }
    }
    Ok(())
}

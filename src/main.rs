mod db;
mod logging;
mod models;
mod run;
mod settings;
mod stats;
mod ui;
mod viewmodel;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = run::Cli::parse();

    let data_dir = settings::data_dir()?;
    logging::init(&data_dir)?;
    let settings = settings::load_or_init(&data_dir)?;
    let db = db::Database::open(&data_dir.join("walletui.db"))?;

    let result = match cli.command {
        None => run::as_tui(&db, &settings),
        Some(command) => run::as_cli(command, &db, &settings),
    };
    if let Err(ref e) = result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}

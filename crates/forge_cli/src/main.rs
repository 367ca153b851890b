//! CLI smoke and inspection entry point.
//!
//! # Responsibility
//! - Verify `forge_core` linkage with deterministic output.
//! - Print a persisted card collection with progress and shares.

use clap::{Arg, Command};
use forge_core::db::open_db;
use forge_core::{
    default_log_level, init_logging, CardStore, CardView, KvCardRepository, SqliteKvStore,
    StoreConfig,
};
use log::warn;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = Command::new("forge_cli")
        .version(forge_core::core_version())
        .about("Inspect a Forge card database")
        .arg(
            Arg::new("db")
                .value_name("DB_PATH")
                .help("SQLite database holding the card collection"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .help("Absolute directory for rolling log files"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value(default_log_level())
                .help("trace|debug|info|warn|error"),
        )
        .get_matches();

    println!("forge_core ping={}", forge_core::ping());
    println!("forge_core version={}", forge_core::core_version());

    if let Some(log_dir) = matches.get_one::<String>("log-dir") {
        let level = matches
            .get_one::<String>("log-level")
            .map_or(default_log_level(), String::as_str);
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(db_path) = matches.get_one::<String>("db") else {
        return ExitCode::SUCCESS;
    };

    match print_collection(db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_collection(db_path: &str) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path)?;
    let config = StoreConfig::default();
    let repo = KvCardRepository::new(SqliteKvStore::new(&conn), config.storage_key.clone());
    let (store, warnings) = CardStore::open(repo, config)?;

    for warning in &warnings {
        warn!("event=cli_load module=cli status=degraded warning=\"{warning}\"");
        eprintln!("warning: {warning}");
    }

    println!("cards={}", store.len());
    for view in store.views() {
        print_card(&view);
    }
    Ok(())
}

fn print_card(view: &CardView<'_>) {
    let marker = if view.card.is_done() { "x" } else { " " };
    println!(
        "[{marker}] #{} {} {} ({:.0}%)",
        view.index,
        view.card.title(),
        view.progress,
        view.progress.percent()
    );
    for share in &view.shares {
        let check = if share.item.is_completed() { "x" } else { " " };
        let quantity = share
            .item
            .quantity()
            .map(|value| format!(" x{value}"))
            .unwrap_or_default();
        let percent = share
            .share_percent
            .map(|value| format!(" {value:.1}%"))
            .unwrap_or_default();
        println!("    [{check}] {}{quantity}{percent}", share.item.name());
    }
}

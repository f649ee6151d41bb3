use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{handle_expense_command, handle_history_command, ExpenseCommands};
use expense_tracker::config::paths::DEFAULT_STORE_FILE;
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track personal expenses from the command line",
    long_about = "Record, edit and remove personal expenses, list them with an optional \
                  category filter, and total them overall or per month. Expenses are \
                  kept in a single JSON file."
)]
struct Cli {
    /// Path to the expense store
    #[arg(long, global = true, default_value = DEFAULT_STORE_FILE)]
    file: PathBuf,

    /// Print diagnostics to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show resolved paths and settings
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(verbosity_level(cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = ExpensePaths::new(cli.file);
    let settings = Settings::load_or_default(&paths)?;
    debug!(store = %paths.store_file().display(), "loaded settings");

    let storage = Storage::new(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Store file:    {}", paths.store_file().display());
            println!("Sequence file: {}", paths.sequence_file().display());
            println!("Lock file:     {}", paths.lock_file().display());
            println!("Audit log:     {}", paths.audit_log().display());
            println!("Settings file: {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Tracker - personal expenses from the command line");
            println!();
            println!("Run 'expense help' for usage information.");
        }
    }

    Ok(())
}

fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Log to stderr so stdout carries only command output.
fn init_logger(level: LevelFilter) {
    let filter = EnvFilter::new(format!(
        "expense_tracker={},{}={}",
        level,
        env!("CARGO_BIN_NAME"),
        level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

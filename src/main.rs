use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger::cli::{
    handle_report_command, handle_transaction_command, ReportCommands, Shell, TransactionCommands,
};
use ledger::config::{LedgerPaths, Settings};
use ledger::storage::{LoadStatus, Storage};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Console personal finance ledger",
    long_about = "Records income and expense transactions in a local JSON file \
                  and reports net totals per month and per category. Run \
                  without a command for the interactive menu."
)]
struct Cli {
    /// Data file to use instead of the default location
    #[arg(short, long, global = true, env = "LEDGER_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    #[command(alias = "menu")]
    Shell,

    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Reports over all transactions
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

/// The audit log lives next to the data file it describes
fn audit_log_for(data_file: &Path) -> PathBuf {
    data_file.with_file_name("audit.log")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // With an explicit data file the default base directory is optional.
    let (paths, data_file) = match (LedgerPaths::new(), cli.file) {
        (Ok(paths), file) => {
            let data_file = file.unwrap_or_else(|| paths.data_file());
            (Some(paths), data_file)
        }
        (Err(e), Some(file)) => {
            log::warn!("{}. Continuing with default settings.", e);
            (None, file)
        }
        (Err(e), None) => return Err(e.into()),
    };
    let settings = paths
        .as_ref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let mut storage = Storage::new(&data_file);
    if settings.audit_enabled {
        storage = storage.with_audit_log(audit_log_for(&data_file));
    }

    let (mut store, status) = storage.load_store();
    match &status {
        LoadStatus::Quarantined(moved_to) => eprintln!(
            "Warning: data file was corrupt and moved to: {}",
            moved_to.display()
        ),
        LoadStatus::Unreadable => eprintln!(
            "Warning: data file was corrupt and could not be moved aside; \
             the next save will replace it: {}",
            storage.path().display()
        ),
        LoadStatus::Fresh | LoadStatus::Loaded => {}
    }

    match cli.command {
        None | Some(Commands::Shell) => {
            let stdin = io::stdin();
            Shell::new(&storage, &settings, stdin.lock(), io::stdout()).run(&mut store)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &mut store, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&store, cmd)?;
        }
        Some(Commands::History { count }) => match storage.audit_logger() {
            Some(logger) => {
                let entries = logger.read_recent(count)?;
                if entries.is_empty() {
                    println!("No audit entries yet.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
            None => println!("Audit logging is disabled."),
        },
        Some(Commands::Config { init }) => {
            if init {
                let paths = paths.as_ref().ok_or_else(|| {
                    anyhow::anyhow!("No base directory available for the settings file")
                })?;
                settings.save(paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("Ledger Configuration");
            println!("====================");
            if let Some(paths) = &paths {
                println!("Base directory: {}", paths.base_dir().display());
                println!("Settings file:  {}", paths.settings_file().display());
            }
            println!("Data file:      {}", storage.path().display());
            if let Some(logger) = storage.audit_logger() {
                println!("Audit log:      {}", logger.path().display());
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Latest count:    {}", settings.latest_count);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!("  Transactions:    {}", store.len());
        }
    }

    Ok(())
}

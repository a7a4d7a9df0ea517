//! Transaction CLI commands
//!
//! Implements the non-interactive commands for transaction management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Money, RawUpdate, Store, TransactionId, TransactionPatch};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction type (income or expense)
        kind: String,
        /// Amount, always positive (e.g., "45.50")
        amount: String,
        /// Category, defaults to Misc
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List transactions, most recent first
    List {
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the latest transactions
    Latest {
        /// Number of transactions to show (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Update a transaction; omitted fields keep their value
    Update {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount, positive
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Delete every transaction and restart ids at 1
    Reset {
        /// Must be exactly YES
        #[arg(long)]
        confirm: Option<String>,
    },
}

/// Parse a transaction id argument
pub fn parse_id(raw: &str) -> LedgerResult<TransactionId> {
    raw.parse()
        .map_err(|_| LedgerError::Validation(format!("ID must be a number, got '{}'", raw)))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    store: &mut Store,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            notes,
        } => {
            let kind = kind.parse().map_err(LedgerError::Validation)?;
            let amount = Money::parse(&amount).map_err(|e| {
                LedgerError::Validation(format!("{}. Use a number like 1200 or 45.50", e))
            })?;
            let date = date
                .map(|d| {
                    parse_date(&d).ok_or_else(|| {
                        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", d))
                    })
                })
                .transpose()?;

            let id = service.create(
                store,
                CreateTransactionInput {
                    category,
                    date,
                    notes,
                    ..CreateTransactionInput::new(kind, amount)
                },
            )?;
            println!("Saved - transaction id: {}", id);
        }
        TransactionCommands::List { limit } => {
            print!(
                "{}",
                format_transaction_register(&service.list(store, limit), currency)
            );
        }
        TransactionCommands::Latest { count } => {
            let count = count.unwrap_or(settings.latest_count);
            print!(
                "{}",
                format_transaction_register(&service.list(store, Some(count)), currency)
            );
        }
        TransactionCommands::Show { id } => {
            let id = parse_id(&id)?;
            let txn = service
                .get(store, id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(txn, currency));
        }
        TransactionCommands::Update {
            id,
            kind,
            amount,
            category,
            date,
            notes,
        } => {
            let id = parse_id(&id)?;
            let (patch, warnings) = TransactionPatch::from_raw(RawUpdate {
                kind: kind.as_deref().unwrap_or_default(),
                amount: amount.as_deref().unwrap_or_default(),
                category: category.as_deref().unwrap_or_default(),
                date: date.as_deref().unwrap_or_default(),
                notes: notes.as_deref().unwrap_or_default(),
            });
            for warning in &warnings {
                eprintln!("Warning: {}", warning);
            }

            let txn = service.update(store, id, &patch)?;
            println!("Transaction updated.");
            print!("{}", format_transaction_details(&txn, currency));
        }
        TransactionCommands::Delete { id } => {
            let id = parse_id(&id)?;
            match service.delete(store, id)? {
                Some(_) => println!("Deleted."),
                None => println!("No transaction found with that id."),
            }
        }
        TransactionCommands::Reset { confirm } => {
            if service.reset(store, confirm.as_deref().unwrap_or_default())? {
                println!("All data removed.");
            } else {
                println!("Cancelled. Pass --confirm YES to delete all data.");
            }
        }
    }

    Ok(())
}

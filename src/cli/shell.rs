//! Interactive menu shell
//!
//! A numbered menu that drives the transaction service and reports. Input
//! and output are generic so the whole loop can run against in-memory
//! buffers. Prompts that need a valid value ask again until they get one;
//! end of input cancels the current action and then leaves the menu.

use std::io::{self, BufRead, Write};

use chrono::Local;

use crate::cli::report::{render_report, ReportCommands};
use crate::cli::transaction::parse_id;
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::LedgerResult;
use crate::models::{
    parse_date, Money, RawUpdate, Store, TransactionPatch, TransactionType, DEFAULT_CATEGORY,
};
use crate::services::{CreateTransactionInput, TransactionService, RESET_CONFIRMATION};
use crate::storage::Storage;

const MENU: &str = "
==== Simple Budget Planner ====
1) Add transaction
2) List transactions
3) View by id
4) Update transaction
5) Delete transaction
6) Monthly summary
7) Category breakdown
8) Show latest
9) Reset (delete all) - DANGEROUS
0) Exit
Choose: ";

/// Interactive session over a reader and a writer
pub struct Shell<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends
    ///
    /// The store is saved once more on the way out; a failure there is
    /// logged and swallowed so the process can always exit.
    pub fn run(&mut self, store: &mut Store) -> io::Result<()> {
        let result = self.menu_loop(store);

        if let Err(e) = self.storage.save_store(store) {
            log::warn!("Final save failed: {}", e);
        }

        result
    }

    fn menu_loop(&mut self, store: &mut Store) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                writeln!(self.output, "\nInput closed - exiting.")?;
                return Ok(());
            };

            let outcome = match choice.as_str() {
                "1" => self.add(store),
                "2" => self.list(store, None),
                "3" => self.view(store),
                "4" => self.update(store),
                "5" => self.delete(store),
                "6" => self.report(store, ReportCommands::Monthly),
                "7" => self.report(store, ReportCommands::Category),
                "8" => self.list(store, Some(self.settings.latest_count)),
                "9" => self.reset(store),
                "0" => {
                    writeln!(self.output, "Goodbye - data saved.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Please choose a number from 0 to 9.")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                writeln!(self.output, "Error: {}", e)?;
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer parses; blank takes the default when there is one
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        default: Option<T>,
        hint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        let mut default = default;
        loop {
            let Some(answer) = self.prompt(prompt)? else {
                return Ok(None);
            };

            if answer.is_empty() {
                if let Some(value) = default.take() {
                    return Ok(Some(value));
                }
            } else if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }

            writeln!(self.output, "{}", hint)?;
        }
    }

    fn add(&mut self, store: &mut Store) -> LedgerResult<()> {
        writeln!(
            self.output,
            "\nAdd a new transaction - type 'income' or 'expense'."
        )?;

        let Some(kind) = self.ask_until(
            "Type (income/expense) [expense]: ",
            Some(TransactionType::Expense),
            "Please enter one of: income, expense",
            |s| s.parse().ok(),
        )?
        else {
            return Ok(());
        };

        let Some(amount) = self.ask_until(
            "Amount: ",
            None,
            "Please enter a number like 1200 or 45.50.",
            |s| Money::parse(s).ok(),
        )?
        else {
            return Ok(());
        };

        if !amount.is_positive() {
            writeln!(self.output, "Amount must be greater than zero.")?;
            return Ok(());
        }

        let Some(category) =
            self.prompt(&format!("Category (e.g. Food, Salary) [{}]: ", DEFAULT_CATEGORY))?
        else {
            return Ok(());
        };

        let Some(date) = self.ask_until(
            "Date (YYYY-MM-DD) [today]: ",
            Some(Local::now().date_naive()),
            "That's not a valid date. Please use YYYY-MM-DD.",
            parse_date,
        )?
        else {
            return Ok(());
        };

        let Some(notes) = self.prompt("Notes (optional): ")? else {
            return Ok(());
        };

        let service = TransactionService::new(self.storage);
        let id = service.create(
            store,
            CreateTransactionInput {
                kind,
                amount,
                category: Some(category),
                date: Some(date),
                notes: Some(notes),
            },
        )?;

        writeln!(self.output, "Saved - transaction id: {}", id)?;
        Ok(())
    }

    fn list(&mut self, store: &Store, limit: Option<usize>) -> LedgerResult<()> {
        let service = TransactionService::new(self.storage);
        let transactions = service.list(store, limit);

        write!(
            self.output,
            "\n{}",
            format_transaction_register(&transactions, &self.settings.currency_symbol)
        )?;
        Ok(())
    }

    fn view(&mut self, store: &Store) -> LedgerResult<()> {
        let Some(raw) = self.prompt("Enter transaction id to view: ")? else {
            return Ok(());
        };
        let id = parse_id(&raw)?;

        let service = TransactionService::new(self.storage);
        match service.get(store, id) {
            Some(txn) => write!(
                self.output,
                "\n{}",
                format_transaction_details(txn, &self.settings.currency_symbol)
            )?,
            None => writeln!(self.output, "Transaction not found.")?,
        }
        Ok(())
    }

    fn update(&mut self, store: &mut Store) -> LedgerResult<()> {
        let Some(raw) = self.prompt("Enter transaction id to update: ")? else {
            return Ok(());
        };
        let id = parse_id(&raw)?;

        let Some(current) = store.get(id).cloned() else {
            writeln!(self.output, "Transaction not found.")?;
            return Ok(());
        };

        writeln!(self.output, "Leave blank to keep the current value.")?;
        writeln!(self.output, "Current type: {}", current.kind)?;
        let Some(kind) = self.prompt("New type (income/expense): ")? else {
            return Ok(());
        };
        writeln!(self.output, "Current amount: {}", current.amount)?;
        let Some(amount) = self.prompt("New amount: ")? else {
            return Ok(());
        };
        let Some(category) = self.prompt(&format!("New category [{}]: ", current.category))?
        else {
            return Ok(());
        };
        let Some(date) = self.prompt(&format!("New date [{}] (YYYY-MM-DD): ", current.date))?
        else {
            return Ok(());
        };
        let Some(notes) = self.prompt(&format!(
            "New notes [{}]: ",
            current.notes.as_deref().unwrap_or_default()
        ))?
        else {
            return Ok(());
        };

        let (patch, warnings) = TransactionPatch::from_raw(RawUpdate {
            kind: &kind,
            amount: &amount,
            category: &category,
            date: &date,
            notes: &notes,
        });
        for warning in &warnings {
            writeln!(self.output, "{}", warning)?;
        }

        let service = TransactionService::new(self.storage);
        service.update(store, id, &patch)?;
        writeln!(self.output, "Transaction updated.")?;
        Ok(())
    }

    fn delete(&mut self, store: &mut Store) -> LedgerResult<()> {
        let Some(raw) = self.prompt("Enter transaction id to delete: ")? else {
            return Ok(());
        };
        let id = parse_id(&raw)?;

        let service = TransactionService::new(self.storage);
        match service.delete(store, id)? {
            Some(_) => writeln!(self.output, "Deleted.")?,
            None => writeln!(self.output, "No transaction found with that id.")?,
        }
        Ok(())
    }

    fn report(&mut self, store: &Store, cmd: ReportCommands) -> LedgerResult<()> {
        write!(self.output, "\n{}", render_report(store, &cmd))?;
        Ok(())
    }

    fn reset(&mut self, store: &mut Store) -> LedgerResult<()> {
        let prompt = format!(
            "Type {} to permanently delete all data: ",
            RESET_CONFIRMATION
        );
        let confirmation = self.prompt(&prompt)?.unwrap_or_default();

        let service = TransactionService::new(self.storage);
        if service.reset(store, &confirmation)? {
            writeln!(self.output, "All data removed.")?;
        } else {
            writeln!(self.output, "Cancelled.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionId;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(storage: &Storage, store: &mut Store, script: &str) -> String {
        let settings = Settings::default();
        let mut output = Vec::new();
        Shell::new(storage, &settings, Cursor::new(script.to_string()), &mut output)
            .run(store)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().join("budget_data.json"));
        (temp_dir, storage)
    }

    #[test]
    fn test_add_reprompts_until_valid() {
        let (_temp, storage) = setup();
        let mut store = Store::new();

        let output = run(
            &storage,
            &mut store,
            "1\nrefund\nincome\nlots\n1200\nSalary\n2024-13-40\n2024-03-01\n\n0\n",
        );

        assert!(output.contains("Please enter one of: income, expense"));
        assert!(output.contains("Please enter a number like 1200 or 45.50."));
        assert!(output.contains("That's not a valid date."));
        assert!(output.contains("Saved - transaction id: 1"));

        let txn = store.get(TransactionId::new(1)).unwrap();
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.amount.cents(), 120000);
        assert_eq!(txn.category, "Salary");
        assert!(txn.notes.is_none());
    }

    #[test]
    fn test_add_defaults() {
        let (_temp, storage) = setup();
        let mut store = Store::new();

        run(&storage, &mut store, "1\n\n45.50\n\n\n\n0\n");

        let txn = store.get(TransactionId::new(1)).unwrap();
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.amount.cents(), -4550);
        assert_eq!(txn.category, "Misc");
        assert_eq!(txn.date, Local::now().date_naive());
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let (_temp, storage) = setup();
        let mut store = Store::new();

        let output = run(&storage, &mut store, "1\nexpense\n0\n0\n");

        assert!(output.contains("Amount must be greater than zero."));
        assert!(store.is_empty());
        assert_eq!(store.next_id, TransactionId::new(1));
    }

    #[test]
    fn test_update_keeps_values_on_bad_input() {
        let (_temp, storage) = setup();
        let mut store = Store::new();
        run(&storage, &mut store, "1\nexpense\n50\nFood\n2024-03-01\n\n0\n");

        let output = run(
            &storage,
            &mut store,
            "4\n1\nincome\n-3\n\nnot-a-date\nlunch\n0\n",
        );

        assert!(output.contains("Keeping old amount"));
        assert!(output.contains("Keeping old date"));
        let txn = store.get(TransactionId::new(1)).unwrap();
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.amount.cents(), 5000);
        assert_eq!(txn.category, "Food");
        assert_eq!(txn.notes.as_deref(), Some("lunch"));
        assert!(txn.updated_at.is_some());
    }

    #[test]
    fn test_update_cancelled_by_end_of_input() {
        let (_temp, storage) = setup();
        let mut store = Store::new();
        run(&storage, &mut store, "1\nexpense\n50\nFood\n2024-03-01\n\n0\n");

        run(&storage, &mut store, "4\n1\nincome\n");

        let txn = store.get(TransactionId::new(1)).unwrap();
        assert_eq!(txn.kind, TransactionType::Expense);
        assert!(txn.updated_at.is_none());
    }

    #[test]
    fn test_lookup_miss_and_bad_id() {
        let (_temp, storage) = setup();
        let mut store = Store::new();

        let output = run(&storage, &mut store, "3\n9\n5\n9\n4\nabc\n0\n");

        assert!(output.contains("Transaction not found."));
        assert!(output.contains("No transaction found with that id."));
        assert!(output.contains("ID must be a number"));
    }

    #[test]
    fn test_reset_gating() {
        let (_temp, storage) = setup();
        let mut store = Store::new();
        run(&storage, &mut store, "1\n\n10\n\n\n\n0\n");

        let output = run(&storage, &mut store, "9\nyes\n0\n");
        assert!(output.contains("Cancelled."));
        assert_eq!(store.len(), 1);

        let output = run(&storage, &mut store, "9\nYES\n0\n");
        assert!(output.contains("All data removed."));
        assert!(store.is_empty());
        assert_eq!(store.next_id, TransactionId::new(1));
    }

    #[test]
    fn test_reports_and_empty_messages() {
        let (_temp, storage) = setup();
        let mut store = Store::new();

        let output = run(&storage, &mut store, "6\n7\n2\n");
        assert!(output.contains("No transactions to summarize."));
        assert!(output.contains("No transactions.\n"));
        assert!(output.contains("No transactions yet"));
        assert!(output.contains("Input closed"));
    }

    #[test]
    fn test_exit_saves_store() {
        let (_temp, storage) = setup();
        let mut store = Store::new();

        run(&storage, &mut store, "0\n");

        assert!(storage.path().exists());
        let (on_disk, _) = storage.load_store();
        assert_eq!(on_disk, Store::new());
    }
}

//! CLI commands for reports

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::Store;
use crate::reports::{CategoryBreakdownReport, MonthlySummaryReport};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Net amount per month, newest first
    #[command(alias = "summary")]
    Monthly,

    /// Net amount per category, largest first
    #[command(alias = "categories")]
    Category,
}

/// Render a report, or the "nothing to report" message
pub fn render_report(store: &Store, cmd: &ReportCommands) -> String {
    match cmd {
        ReportCommands::Monthly => MonthlySummaryReport::generate(store)
            .map(|r| r.format_terminal())
            .unwrap_or_else(|| "No transactions to summarize.\n".to_string()),
        ReportCommands::Category => CategoryBreakdownReport::generate(store)
            .map(|r| r.format_terminal())
            .unwrap_or_else(|| "No transactions.\n".to_string()),
    }
}

/// Handle report commands
pub fn handle_report_command(store: &Store, cmd: ReportCommands) -> LedgerResult<()> {
    print!("{}", render_report(store, &cmd));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_messages() {
        let store = Store::new();
        assert_eq!(
            render_report(&store, &ReportCommands::Monthly),
            "No transactions to summarize.\n"
        );
        assert_eq!(
            render_report(&store, &ReportCommands::Category),
            "No transactions.\n"
        );
    }
}

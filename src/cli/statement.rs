//! CLI commands for statements
//!
//! `show` prints a statement to the terminal; `export` writes it as a PDF,
//! spreadsheet or CSV file and records the export in the history log.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_statement;
use crate::error::{DairyError, DairyResult};
use crate::export::ExportFormat;
use crate::history::{ExportLogger, ExportRecord};
use crate::models::CustomerFilter;
use crate::session::StatementSession;
use crate::storage::Storage;

/// Statement subcommands
#[derive(Subcommand, Debug)]
pub enum StatementCommands {
    /// Generate a statement and print it
    Show {
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end: Option<String>,

        /// Customer ID, or "all"
        #[arg(short, long, default_value = "all")]
        customer: String,
    },

    /// Generate a statement and write it to a file
    Export {
        /// Output format
        #[arg(short, long, value_enum)]
        format: ExportFormat,

        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end: Option<String>,

        /// Customer ID, or "all"
        #[arg(short, long, default_value = "all")]
        customer: String,

        /// Directory to write into (defaults to the configured export directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Handle statement commands
pub fn handle_statement_command(
    storage: &Storage,
    settings: &Settings,
    cmd: StatementCommands,
) -> DairyResult<()> {
    match cmd {
        StatementCommands::Show {
            start,
            end,
            customer,
        } => {
            let mut session = build_session(start, end, &customer)?;
            session.generate(storage)?;

            if let (Some(statement), Some(meta)) = (session.statement(), session.meta(settings)) {
                print!("{}", format_statement(statement, &meta));
            }
            Ok(())
        }
        StatementCommands::Export {
            format,
            start,
            end,
            customer,
            output_dir,
        } => {
            let mut session = build_session(start, end, &customer)?;
            session.generate(storage)?;

            let dir = output_dir.unwrap_or_else(|| settings.resolve_export_dir(storage.paths()));
            let Some(path) = session.export(settings, format, &dir)? else {
                println!("No statement generated; nothing exported.");
                return Ok(());
            };

            if let (Some(statement), Some(meta)) = (session.statement(), session.meta(settings)) {
                let logger = ExportLogger::new(storage.paths().export_log());
                logger.log(&ExportRecord::new(format, &path, &meta, statement))?;
            }

            println!("Statement exported to: {}", path.display());
            Ok(())
        }
    }
}

fn build_session(
    start: Option<String>,
    end: Option<String>,
    customer: &str,
) -> DairyResult<StatementSession> {
    let mut session = StatementSession::default();

    let start_date = match start {
        Some(s) => parse_date(&s, "start")?,
        None => session.start_date,
    };
    let end_date = match end {
        Some(e) => parse_date(&e, "end")?,
        None => session.end_date,
    };
    let customer: CustomerFilter = customer
        .parse()
        .map_err(|_| DairyError::Validation("Customer must be an ID or \"all\"".into()))?;

    session.set_range(start_date, end_date);
    session.set_customer(customer);
    Ok(session)
}

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date(value: &str, what: &str) -> DairyResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        DairyError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            what, value
        ))
    })
}

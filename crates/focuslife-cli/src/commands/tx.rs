//! Finance ledger commands for CLI.

use chrono::Datelike;
use clap::Subcommand;
use focuslife_core::{monthly_summary, Database, Transaction, TransactionFilter};

use crate::common::{parse_date, parse_kind, today};

#[derive(Subcommand)]
pub enum TxAction {
    /// Record a transaction
    Add {
        /// Amount (positive)
        amount: f64,
        /// Kind: income or expense
        #[arg(long, default_value = "expense")]
        kind: String,
        /// Category label
        #[arg(long, default_value = "general")]
        category: String,
        /// Transaction date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Optional note
        #[arg(long)]
        notes: Option<String>,
    },
    /// List transactions
    List {
        /// Filter by kind (income, expense)
        #[arg(long)]
        kind: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Only transactions on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Only transactions on or before this date
        #[arg(long)]
        to: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Monthly income/expense summary
    Summary {
        /// Year (default: current)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (default: current)
        #[arg(long)]
        month: Option<u32>,
    },
}

pub fn run(action: TxAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TxAction::Add {
            amount,
            kind,
            category,
            date,
            notes,
        } => {
            let day = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let tx = Transaction::new(amount, parse_kind(&kind)?, category, day, notes)?;
            db.create_transaction(&tx)?;
            println!("Transaction recorded: {}", tx.id);
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        TxAction::List {
            kind,
            category,
            from,
            to,
        } => {
            let filter = TransactionFilter {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                category,
                from: from.as_deref().map(parse_date).transpose()?,
                to: to.as_deref().map(parse_date).transpose()?,
            };
            let transactions = db.list_transactions(&filter)?;
            println!("{}", serde_json::to_string_pretty(&transactions)?);
        }
        TxAction::Delete { id } => {
            db.delete_transaction(&id)?;
            println!("Transaction deleted: {id}");
        }
        TxAction::Summary { year, month } => {
            let reference = today();
            let year = year.unwrap_or_else(|| reference.year());
            let month = month.unwrap_or_else(|| reference.month());
            let transactions = db.list_transactions(&TransactionFilter::default())?;
            let summary = monthly_summary(&transactions, year, month);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

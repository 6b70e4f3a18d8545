//! Personal finance domain types.
//!
//! Transactions are an independent ledger resource: dated income and
//! expense records with a category, a filter predicate, and a monthly
//! summary aggregation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with a fresh id.
    ///
    /// # Errors
    /// Returns a validation error if the amount is not a positive finite
    /// number or the category is blank.
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::invalid_value(
                "amount",
                "amount must be a positive number",
            ));
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ValidationError::invalid_value(
                "category",
                "category must not be blank",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            amount,
            kind,
            category,
            date,
            notes,
            created_at: Utc::now(),
        })
    }
}

/// Filter predicate for transaction listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &tx.category != category {
                return false;
            }
        }
        if let Some(from) = self.from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.date > to {
                return false;
            }
        }
        true
    }
}

/// Per-category expense total within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Income, expense, and net totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    /// Expense totals per category, largest first
    pub by_category: Vec<CategoryTotal>,
}

/// Aggregate a month of transactions into totals.
pub fn monthly_summary(transactions: &[Transaction], year: i32, month: u32) -> MonthlySummary {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();

    for tx in transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
    {
        match tx.kind {
            TransactionKind::Income => income += tx.amount,
            TransactionKind::Expense => {
                expense += tx.amount;
                *by_category.entry(tx.category.as_str()).or_insert(0.0) += tx.amount;
            }
        }
    }

    let mut by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    // BTreeMap iteration gives name order; a stable sort on total keeps
    // the alphabetical order among equal totals
    by_category.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    MonthlySummary {
        year,
        month,
        income,
        expense,
        net: income - expense,
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn tx(amount: f64, kind: TransactionKind, category: &str, date: NaiveDate) -> Transaction {
        Transaction::new(amount, kind, category, date, None).unwrap()
    }

    #[test]
    fn validation_rejects_bad_amounts() {
        let day = date(2024, 3, 1);
        assert!(Transaction::new(0.0, TransactionKind::Expense, "food", day, None).is_err());
        assert!(Transaction::new(-5.0, TransactionKind::Expense, "food", day, None).is_err());
        assert!(Transaction::new(f64::NAN, TransactionKind::Expense, "food", day, None).is_err());
        assert!(Transaction::new(12.5, TransactionKind::Expense, "  ", day, None).is_err());
    }

    #[test]
    fn filter_by_kind_category_and_window() {
        let t = tx(20.0, TransactionKind::Expense, "food", date(2024, 3, 10));

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            category: Some("food".to_string()),
            from: Some(date(2024, 3, 1)),
            to: Some(date(2024, 3, 31)),
        };
        assert!(filter.matches(&t));

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        assert!(!filter.matches(&t));

        let filter = TransactionFilter {
            to: Some(date(2024, 3, 9)),
            ..Default::default()
        };
        assert!(!filter.matches(&t));
    }

    #[test]
    fn monthly_summary_totals() {
        let transactions = vec![
            tx(3000.0, TransactionKind::Income, "salary", date(2024, 3, 1)),
            tx(40.0, TransactionKind::Expense, "food", date(2024, 3, 5)),
            tx(60.0, TransactionKind::Expense, "food", date(2024, 3, 12)),
            tx(500.0, TransactionKind::Expense, "rent", date(2024, 3, 2)),
            tx(99.0, TransactionKind::Expense, "food", date(2024, 2, 28)), // other month
        ];

        let summary = monthly_summary(&transactions, 2024, 3);
        assert_eq!(summary.income, 3000.0);
        assert_eq!(summary.expense, 600.0);
        assert_eq!(summary.net, 2400.0);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, "rent");
        assert_eq!(summary.by_category[0].total, 500.0);
        assert_eq!(summary.by_category[1].category, "food");
        assert_eq!(summary.by_category[1].total, 100.0);
    }

    #[test]
    fn monthly_summary_of_empty_month() {
        let summary = monthly_summary(&[], 2024, 3);
        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expense, 0.0);
        assert_eq!(summary.net, 0.0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn equal_totals_keep_alphabetical_order() {
        let transactions = vec![
            tx(50.0, TransactionKind::Expense, "zoo", date(2024, 3, 1)),
            tx(50.0, TransactionKind::Expense, "art", date(2024, 3, 2)),
        ];
        let summary = monthly_summary(&transactions, 2024, 3);
        assert_eq!(summary.by_category[0].category, "art");
        assert_eq!(summary.by_category[1].category, "zoo");
    }
}

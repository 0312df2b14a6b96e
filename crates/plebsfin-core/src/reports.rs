//! Summary structures for API responses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Bill, CashflowEntry};
use crate::types::CashflowType;

/// Cashflow totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub entry_count: usize,
}

impl CashflowSummary {
    pub fn from_entries(entries: &[CashflowEntry]) -> Self {
        let (income, expense) = entries.iter().fold((0.0, 0.0), |(income, expense), entry| {
            match entry.kind {
                CashflowType::Income => (income + entry.amount, expense),
                CashflowType::Expense => (income, expense + entry.amount),
            }
        });

        Self {
            total_income: income,
            total_expense: expense,
            net: income - expense,
            entry_count: entries.len(),
        }
    }
}

/// Outstanding bills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub unpaid_count: usize,
    pub total_unpaid: f64,
    pub overdue_count: usize,
}

impl BillSummary {
    /// A bill is overdue when unpaid and its due date falls strictly before
    /// `today`. Due dates that do not start with `YYYY-MM-DD` are never overdue.
    pub fn from_bills(bills: &[Bill], today: NaiveDate) -> Self {
        let unpaid: Vec<&Bill> = bills.iter().filter(|b| !b.paid).collect();

        Self {
            unpaid_count: unpaid.len(),
            total_unpaid: unpaid.iter().map(|b| b.amount).sum(),
            overdue_count: unpaid
                .iter()
                .filter(|b| due_date(&b.due_date).is_some_and(|due| due < today))
                .count(),
        }
    }
}

/// Leading calendar date of a stored due date (`2024-02-01` or a full ISO timestamp)
fn due_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: f64, kind: CashflowType) -> CashflowEntry {
        CashflowEntry {
            id: "1".to_string(),
            date: "2024-01-15".to_string(),
            description: "x".to_string(),
            amount,
            kind,
            created_at: "2024-01-15T00:00:00.000Z".to_string(),
        }
    }

    fn bill(amount: f64, due_date: &str, paid: bool) -> Bill {
        Bill {
            id: due_date.to_string(),
            description: "bill".to_string(),
            amount,
            due_date: due_date.to_string(),
            paid,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_cashflow_summary() {
        let summary = CashflowSummary::from_entries(&[
            entry(2500.0, CashflowType::Income),
            entry(400.0, CashflowType::Expense),
            entry(100.0, CashflowType::Expense),
        ]);
        assert_eq!(summary.total_income, 2500.0);
        assert_eq!(summary.total_expense, 500.0);
        assert_eq!(summary.net, 2000.0);
        assert_eq!(summary.entry_count, 3);
    }

    #[test]
    fn test_empty_cashflow_summary() {
        let summary = CashflowSummary::from_entries(&[]);
        assert_eq!(summary.net, 0.0);
        assert_eq!(summary.entry_count, 0);
    }

    #[test]
    fn test_bill_summary_counts_unpaid_and_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let summary = BillSummary::from_bills(
            &[
                bill(100.0, "2024-02-01", false),
                bill(50.0, "2024-02-10", false),
                bill(75.0, "2024-01-01", true),
                bill(20.0, "2024-02-09T23:00:00.000Z", false),
                bill(5.0, "soon", false),
            ],
            today,
        );
        assert_eq!(summary.unpaid_count, 4);
        assert_eq!(summary.total_unpaid, 175.0);
        // Due today is not overdue; the paid bill is ignored
        assert_eq!(summary.overdue_count, 2);
    }

    #[test]
    fn test_summary_json_is_camel_case() {
        let json = serde_json::to_value(BillSummary { unpaid_count: 1, total_unpaid: 2.0, overdue_count: 0 }).unwrap();
        assert_eq!(json["unpaidCount"], 1);
        assert_eq!(json["totalUnpaid"], 2.0);
        assert_eq!(json["overdueCount"], 0);
    }
}

//! Budget and expense aggregates for the financial widgets.
//!
//! # Responsibility
//! - Validate budget and expense records entered through the forms.
//! - Classify budgets into on-track / warning / over-budget bands.
//! - Total spending overall and for the current calendar month.
//!
//! # Invariants
//! - Money amounts are finite and non-negative; expenses are strictly positive.
//! - A zero budget limit never divides: percentages are `None` and status is
//!   decided by whether anything was spent.
//! - Calendar months are UTC.

use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Spent share, in percent, from which a budget shows a warning.
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;
/// Spent share, in percent, from which a budget is over.
pub const BUDGET_OVER_PERCENT: f64 = 100.0;

pub type FinanceResult<T> = Result<T, FinanceError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FinanceError {
    BlankCategory,
    BlankDescription,
    /// Negative, NaN or infinite money amount.
    InvalidAmount(f64),
    /// Expenses must move money.
    ZeroExpense,
}

impl Display for FinanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCategory => write!(f, "budget category must not be blank"),
            Self::BlankDescription => write!(f, "expense description must not be blank"),
            Self::InvalidAmount(value) => {
                write!(f, "amount ({value}) must be finite and >= 0")
            }
            Self::ZeroExpense => write!(f, "expense amount must be greater than zero"),
        }
    }
}

impl Error for FinanceError {}

/// Band shown next to a budget's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Warning => "Warning",
            Self::OverBudget => "Over Budget!",
        }
    }
}

/// Monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
}

impl Budget {
    /// New budget with nothing spent yet.
    pub fn new(category: impl Into<String>, limit: f64) -> FinanceResult<Self> {
        let budget = Self {
            category: category.into().trim().to_string(),
            limit,
            spent: 0.0,
        };
        budget.validate()?;
        Ok(budget)
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if self.category.trim().is_empty() {
            return Err(FinanceError::BlankCategory);
        }
        check_amount(self.limit)?;
        check_amount(self.spent)
    }

    pub fn set_limit(&mut self, limit: f64) -> FinanceResult<()> {
        check_amount(limit)?;
        self.limit = limit;
        Ok(())
    }

    /// Share of the limit already spent; `None` for a zero limit.
    pub fn spent_percent(&self) -> Option<f64> {
        spent_percent(self.spent, self.limit)
    }

    /// Negative once the budget is exceeded.
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    pub fn status(&self) -> BudgetStatus {
        budget_status(self.spent, self.limit)
    }
}

/// Totals across every budget card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub total_limit: f64,
    pub total_spent: f64,
    pub remaining: f64,
    /// `None` when the limits add up to zero.
    pub spent_percent: Option<f64>,
    pub status: BudgetStatus,
}

pub fn budget_overview(budgets: &[Budget]) -> BudgetOverview {
    let total_limit: f64 = budgets.iter().map(|budget| budget.limit).sum();
    let total_spent: f64 = budgets.iter().map(|budget| budget.spent).sum();
    BudgetOverview {
        total_limit,
        total_spent,
        remaining: total_limit - total_spent,
        spent_percent: spent_percent(total_spent, total_limit),
        status: budget_status(total_spent, total_limit),
    }
}

fn spent_percent(spent: f64, limit: f64) -> Option<f64> {
    (limit > 0.0).then(|| spent / limit * 100.0)
}

// Cross-multiplied so the 80/100 boundaries are exact for whole amounts.
fn budget_status(spent: f64, limit: f64) -> BudgetStatus {
    if limit <= 0.0 {
        return if spent > 0.0 {
            BudgetStatus::OverBudget
        } else {
            BudgetStatus::OnTrack
        };
    }
    let scaled_spent = spent * 100.0;
    if scaled_spent >= limit * BUDGET_OVER_PERCENT {
        BudgetStatus::OverBudget
    } else if scaled_spent >= limit * BUDGET_WARNING_PERCENT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    }
}

/// One recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// Unix epoch milliseconds.
    pub spent_at_ms: i64,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        spent_at_ms: i64,
    ) -> FinanceResult<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(FinanceError::BlankDescription);
        }
        check_amount(amount)?;
        if amount == 0.0 {
            return Err(FinanceError::ZeroExpense);
        }
        Ok(Self {
            description,
            amount,
            category: category.into(),
            spent_at_ms,
        })
    }
}

/// Headline numbers for the expense tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTotals {
    pub count: usize,
    pub total: f64,
    /// Expenses in the UTC calendar month (and year) containing `as_of_ms`.
    pub this_month: f64,
}

pub fn expense_totals(expenses: &[Expense], as_of_ms: i64) -> ExpenseTotals {
    let total = expenses.iter().map(|expense| expense.amount).sum();
    let this_month = expenses
        .iter()
        .filter(|expense| same_utc_month(expense.spent_at_ms, as_of_ms))
        .map(|expense| expense.amount)
        .sum();
    ExpenseTotals {
        count: expenses.len(),
        total,
        this_month,
    }
}

/// Whether both instants fall in the same UTC calendar month of the same year.
pub fn same_utc_month(left_ms: i64, right_ms: i64) -> bool {
    match (
        DateTime::from_timestamp_millis(left_ms),
        DateTime::from_timestamp_millis(right_ms),
    ) {
        (Some(left), Some(right)) => left.year() == right.year() && left.month() == right.month(),
        _ => false,
    }
}

fn check_amount(value: f64) -> FinanceResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FinanceError::InvalidAmount(value));
    }
    Ok(())
}

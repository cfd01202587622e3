use crate::date_utils::TIMESTAMP_FORMAT;
use crate::error::AppResult;
use crate::models::{Entry, NewSnapshot, RawEntry};
use crate::services::aggregate::{self, CategoryMap};
use crate::services::normalize::annualize;
use chrono::Local;
use tracing::debug;

/// The two income fields the input provider always supplies. Their absence
/// is a wiring bug, not a user error.
pub const TOTAL_SALARY: &str = "Total Salary";
pub const EARNED_INCOME_PENSION: &str = "Earned Income & Pension";

/// The expense total together with the category breakdown it was derived
/// from. This value object carries the result of the "compute expenses" step
/// into the "build snapshot" step; the persisted expense figure is never
/// re-derived at save time.
#[derive(Debug, Clone)]
pub struct ExpenseSummary {
    pub by_category: CategoryMap,
    pub total: f64,
}

/// Run the category aggregation over the expense fields and return the
/// grand total. Fails without producing partial totals if any field does
/// not validate.
pub fn compute_total_expenses(expense_fields: &[RawEntry]) -> AppResult<ExpenseSummary> {
    let entries = Entry::parse_all(expense_fields)?;
    let by_category = aggregate::aggregate(&entries);
    let total = aggregate::total(&by_category);
    debug!(total, categories = by_category.len(), "Computed total expenses");
    Ok(ExpenseSummary { by_category, total })
}

/// Annualized income sum minus the expense total. A negative result is a
/// valid outcome (spending exceeds income), not an error.
pub fn compute_savings(income_fields: &[RawEntry], total_expenses: f64) -> AppResult<f64> {
    let income = Entry::parse_all(income_fields)?;
    let income_total: f64 = income
        .iter()
        .map(|e| annualize(e.amount, e.frequency))
        .sum();
    Ok(income_total - total_expenses)
}

/// Compose the expense and savings steps into a snapshot stamped with the
/// current instant.
///
/// Income columns store the amounts as entered; only the expense and savings
/// totals carry the annualized convention. The reserved pension column is
/// written as zero.
///
/// # Panics
///
/// Panics if the income fields are missing `"Total Salary"` or
/// `"Earned Income & Pension"` — the input provider contract guarantees both.
pub fn build_snapshot(
    income_fields: &[RawEntry],
    expense_fields: &[RawEntry],
) -> AppResult<NewSnapshot> {
    let expenses = compute_total_expenses(expense_fields)?;
    let total_savings = compute_savings(income_fields, expenses.total)?;

    let income = Entry::parse_all(income_fields)?;
    let amount_of = |label: &str| -> f64 {
        income
            .iter()
            .find(|e| e.label == label)
            .unwrap_or_else(|| panic!("input provider did not supply the '{}' field", label))
            .amount
    };

    let snapshot = NewSnapshot {
        total_salary: amount_of(TOTAL_SALARY),
        earned_income: amount_of(EARNED_INCOME_PENSION),
        pension_social_security: 0.0,
        total_expenses: expenses.total,
        total_savings,
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    };
    debug!(
        total_expenses = snapshot.total_expenses,
        total_savings = snapshot.total_savings,
        timestamp = %snapshot.timestamp,
        "Built snapshot"
    );
    Ok(snapshot)
}

use serde::{Deserialize, Serialize};

/// One persisted row of aggregated totals. Immutable after creation; the
/// store only ever appends these.
///
/// Income figures are stored as entered; `total_expenses` and
/// `total_savings` carry the annualized aggregation result.
/// `pension_social_security` is a reserved column that is always written as
/// zero (no input field feeds it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub id: i64,
    pub total_salary: f64,
    pub earned_income: f64,
    pub pension_social_security: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
    /// `YYYY-MM-DD HH:MM:SS`, local time, second precision.
    pub timestamp: String,
}

/// A snapshot assembled by the budget engine, ready for insertion. The
/// engine owns it only until it is handed to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSnapshot {
    pub total_salary: f64,
    pub earned_income: f64,
    pub pension_social_security: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
    pub timestamp: String,
}

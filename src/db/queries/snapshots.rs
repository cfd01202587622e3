use crate::models::{BudgetSnapshot, NewSnapshot};
use rusqlite::{params, Connection};
use tracing::debug;

/// Append a snapshot row. The store is append-only: there is no update or
/// delete path, and rows are never touched again after insertion.
pub fn insert_snapshot(conn: &Connection, snapshot: &NewSnapshot) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO snapshots (total_salary, earned_income, pension_social_security,
                                total_expenses, total_savings, timestamp)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            snapshot.total_salary,
            snapshot.earned_income,
            snapshot.pension_social_security,
            snapshot.total_expenses,
            snapshot.total_savings,
            snapshot.timestamp,
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(snapshot_id = id, timestamp = %snapshot.timestamp, "Inserted snapshot");
    Ok(id)
}

/// All snapshots whose timestamp falls within `[start, end]` inclusive, in
/// insertion order. Bounds are stored-timestamp strings
/// (`YYYY-MM-DD HH:MM:SS`); the comparison is textual, which matches
/// chronological order for that format.
pub fn query_range(
    conn: &Connection,
    start: &str,
    end: &str,
) -> rusqlite::Result<Vec<BudgetSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, total_salary, earned_income, pension_social_security,
                total_expenses, total_savings, timestamp
         FROM snapshots
         WHERE timestamp BETWEEN ? AND ?
         ORDER BY id",
    )?;

    let snapshots: Vec<BudgetSnapshot> = stmt
        .query_map(params![start, end], |row| {
            Ok(BudgetSnapshot {
                id: row.get(0)?,
                total_salary: row.get(1)?,
                earned_income: row.get(2)?,
                pension_social_security: row.get(3)?,
                total_expenses: row.get(4)?,
                total_savings: row.get(5)?,
                timestamp: row.get(6)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    debug!(count = snapshots.len(), start, end, "Queried snapshot range");
    Ok(snapshots)
}

pub fn count_snapshots(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))
}

//! Shared test utilities for integration tests.
//!
//! Provides a `TestStore` over a fresh in-memory database with migrations
//! applied, plus builders for entry fields and snapshots. Methods are
//! intentionally broad to support scenarios across different test files.

#![allow(dead_code)]

use nestegg::db::{create_in_memory_pool, migrations, DbPool};
use nestegg::models::{NewSnapshot, RawEntry};
use nestegg::services::budget::{EARNED_INCOME_PENSION, TOTAL_SALARY};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

pub struct TestStore {
    pub pool: DbPool,
}

impl TestStore {
    /// Fresh in-memory database with the schema applied.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }
        Self { pool }
    }

    pub fn conn(&self) -> r2d2::PooledConnection<SqliteConnectionManager> {
        self.pool.get().expect("Failed to get connection")
    }

    /// Insert a snapshot with the given timestamp and totals, returning its id.
    pub fn insert_at(&self, timestamp: &str, total_expenses: f64, total_savings: f64) -> i64 {
        let snapshot = snapshot_at(timestamp, total_expenses, total_savings);
        nestegg::db::queries::snapshots::insert_snapshot(&self.conn(), &snapshot)
            .expect("Failed to insert snapshot")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot with fixed income figures and the given totals.
pub fn snapshot_at(timestamp: &str, total_expenses: f64, total_savings: f64) -> NewSnapshot {
    NewSnapshot {
        total_salary: 3000.0,
        earned_income: 500.0,
        pension_social_security: 0.0,
        total_expenses,
        total_savings,
        timestamp: timestamp.to_string(),
    }
}

/// The two income fields the input provider always supplies.
pub fn income_fields() -> Vec<RawEntry> {
    vec![
        RawEntry::new(TOTAL_SALARY, "3000", "Monthly"),
        RawEntry::new(EARNED_INCOME_PENSION, "500", "Monthly"),
    ]
}

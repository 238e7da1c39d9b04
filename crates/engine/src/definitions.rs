//! Migration Definitions - Types reported back to the command line
//!
//! The engine owns the actual bookkeeping; these types are the read-only view
//! of it that `up`, `down` and `status` print.

use serde::Serialize;
use std::time::Instant;

/// One migration known to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationInfo {
    /// Version (the unix timestamp prefix of the file name)
    pub version: i64,
    /// Human-readable description derived from the file name
    pub description: String,
    /// Whether the target database records this version as applied
    pub applied: bool,
}

/// Migration direction for execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDirection {
    /// Apply the migration (run UP statements)
    Up,
    /// Rollback the migration (run DOWN statements)
    Down,
}

/// Result of one `apply_all` or `revert_all` run
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub direction: MigrationDirection,
    /// Migrations touched, in the order the engine executed them
    pub migrations: Vec<MigrationInfo>,
    pub execution_time_ms: u128,
}

impl MigrationReport {
    pub(crate) fn completed(
        direction: MigrationDirection,
        migrations: Vec<MigrationInfo>,
        started: Instant,
    ) -> Self {
        let applied = direction == MigrationDirection::Up;
        Self {
            direction,
            migrations: migrations
                .into_iter()
                .map(|m| MigrationInfo { applied, ..m })
                .collect(),
            execution_time_ms: started.elapsed().as_millis(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }
}

//! Migration Runner - The engine seam used by the command line
//!
//! Ordering, version bookkeeping, locking and SQL execution all belong to
//! `sqlx::migrate::Migrator`. This module only resolves the migration
//! directory, picks a backend and reports what the engine did.

use async_trait::async_trait;
use sqlx::migrate::{AppliedMigration, Migrate, Migrator};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use sqlmig_core::{mask_database_url, EngineKind};

use crate::backends::{AnyEngine, PostgresEngine};
use crate::definitions::{MigrationInfo, MigrationReport};
use crate::error::{EngineError, EngineResult};

/// Every applied version is strictly greater than this.
pub const BEFORE_FIRST_VERSION: i64 = 0;

/// An open connection to the migration engine for one invocation
#[async_trait]
pub trait MigrationEngine: Send {
    /// Which adapter variant this is
    fn kind(&self) -> EngineKind;

    /// Apply every pending migration in ascending version order, stopping at
    /// the first failure.
    async fn apply_all(&mut self) -> EngineResult<MigrationReport>;

    /// Revert every applied migration in descending version order, stopping
    /// at the first failure.
    async fn revert_all(&mut self) -> EngineResult<MigrationReport>;

    /// Every migration in the directory with its applied state.
    async fn status(&mut self) -> EngineResult<Vec<MigrationInfo>>;

    /// Close the database connection, consuming the engine.
    async fn close(self: Box<Self>);
}

/// Resolve `migrations_dir` and connect the adapter selected by `kind`.
///
/// The directory is read before any connection is attempted.
pub async fn connect(
    kind: EngineKind,
    database_url: &str,
    migrations_dir: &Path,
) -> EngineResult<Box<dyn MigrationEngine>> {
    let migrator = load_migrator(migrations_dir).await?;
    debug!(
        engine = %kind,
        url = %mask_database_url(database_url),
        "connecting migration engine"
    );

    let engine: Box<dyn MigrationEngine> = match kind {
        EngineKind::Driver => Box::new(PostgresEngine::connect(database_url, migrator).await?),
        EngineKind::Url => Box::new(AnyEngine::connect(database_url, migrator).await?),
    };
    Ok(engine)
}

/// Read the `.up.sql` / `.down.sql` files of a migration directory.
pub async fn load_migrator(migrations_dir: &Path) -> EngineResult<Migrator> {
    if !migrations_dir.is_dir() {
        return Err(EngineError::Source {
            dir: migrations_dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let migrator = Migrator::new(migrations_dir)
        .await
        .map_err(|e| EngineError::Source {
            dir: migrations_dir.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        dir = %migrations_dir.display(),
        count = migrator.iter().filter(|m| !m.migration_type.is_down_migration()).count(),
        "migrations resolved"
    );
    Ok(migrator)
}

/// Query the engine's bookkeeping table and merge it with the directory.
pub(crate) async fn migration_status<C>(
    conn: &mut C,
    migrator: &Migrator,
) -> EngineResult<Vec<MigrationInfo>>
where
    C: Migrate + Send,
{
    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;
    Ok(merge_status(migrator, &applied))
}

pub(crate) fn merge_status(migrator: &Migrator, applied: &[AppliedMigration]) -> Vec<MigrationInfo> {
    let applied: HashSet<i64> = applied.iter().map(|m| m.version).collect();

    let mut status: Vec<MigrationInfo> = migrator
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationInfo {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect();

    status.sort_by_key(|m| m.version);
    status
}

/// Not yet applied, oldest first.
pub(crate) fn pending(status: &[MigrationInfo]) -> Vec<MigrationInfo> {
    status.iter().filter(|m| !m.applied).cloned().collect()
}

/// Applied, newest first.
pub(crate) fn revertible(status: &[MigrationInfo]) -> Vec<MigrationInfo> {
    status
        .iter()
        .rev()
        .filter(|m| m.applied && m.version > BEFORE_FIRST_VERSION)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::fs;
    use tempfile::TempDir;

    fn write_pair(dir: &Path, version: i64, name: &str, up: &str, down: &str) {
        fs::write(dir.join(format!("{}_{}.up.sql", version, name)), up).unwrap();
        fs::write(dir.join(format!("{}_{}.down.sql", version, name)), down).unwrap();
    }

    fn applied(version: i64) -> AppliedMigration {
        AppliedMigration {
            version,
            checksum: Cow::Owned(Vec::new()),
        }
    }

    async fn three_migrations() -> (TempDir, Migrator) {
        let dir = TempDir::new().unwrap();
        write_pair(dir.path(), 3, "add_index", "CREATE INDEX i ON t (id);", "DROP INDEX i;");
        write_pair(dir.path(), 1, "create_table", "CREATE TABLE t (id INT);", "DROP TABLE t;");
        write_pair(dir.path(), 2, "add_column", "ALTER TABLE t ADD c INT;", "ALTER TABLE t DROP c;");
        let migrator = load_migrator(dir.path()).await.unwrap();
        (dir, migrator)
    }

    #[tokio::test]
    async fn test_load_migrator_reads_reversible_pairs() {
        let (_dir, migrator) = three_migrations().await;
        let ups: Vec<i64> = migrator
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .map(|m| m.version)
            .collect();
        assert_eq!(ups.len(), 3);
        assert!(migrator.iter().any(|m| m.migration_type.is_down_migration()));
    }

    #[tokio::test]
    async fn test_load_migrator_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = load_migrator(&dir.path().join("missing")).await.unwrap_err();
        assert!(matches!(err, EngineError::Source { .. }));
    }

    #[tokio::test]
    async fn test_connect_reads_directory_before_connecting() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        // Nothing listens on port 1; a connection attempt would fail differently.
        let result = connect(EngineKind::Driver, "postgres://u:p@127.0.0.1:1/app", &missing).await;
        assert!(matches!(result, Err(EngineError::Source { .. })));
    }

    #[tokio::test]
    async fn test_merge_status_orders_and_marks_applied() {
        let (_dir, migrator) = three_migrations().await;
        let status = merge_status(&migrator, &[applied(1)]);

        let versions: Vec<i64> = status.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert_eq!(status[0].description, "create table");
        assert!(status[0].applied);
        assert!(!status[1].applied);
        assert!(!status[2].applied);
    }

    #[tokio::test]
    async fn test_pending_is_ascending_and_revertible_descending() {
        let (_dir, migrator) = three_migrations().await;
        let status = merge_status(&migrator, &[applied(1), applied(2)]);

        let pending: Vec<i64> = pending(&status).iter().map(|m| m.version).collect();
        assert_eq!(pending, vec![3]);

        let revertible: Vec<i64> = revertible(&status).iter().map(|m| m.version).collect();
        assert_eq!(revertible, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_empty_directory_has_nothing_to_do() {
        let dir = TempDir::new().unwrap();
        let migrator = load_migrator(dir.path()).await.unwrap();
        let status = merge_status(&migrator, &[]);
        assert!(status.is_empty());
        assert!(pending(&status).is_empty());
        assert!(revertible(&status).is_empty());
    }
}

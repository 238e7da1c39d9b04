//! URL-mediated backend
//!
//! Hands the raw address to sqlx and lets the URL scheme select the driver.

use async_trait::async_trait;
use sqlx::any::install_default_drivers;
use sqlx::migrate::Migrator;
use sqlx::{AnyConnection, Connection};
use std::time::Instant;
use tracing::{debug, info, warn};

use sqlmig_core::EngineKind;

use crate::definitions::{MigrationDirection, MigrationInfo, MigrationReport};
use crate::error::{EngineError, EngineResult};
use crate::runner::{self, MigrationEngine, BEFORE_FIRST_VERSION};

pub struct AnyEngine {
    conn: AnyConnection,
    migrator: Migrator,
}

impl AnyEngine {
    pub async fn connect(database_url: &str, migrator: Migrator) -> EngineResult<Self> {
        install_default_drivers();

        let conn = AnyConnection::connect(database_url)
            .await
            .map_err(|e| EngineError::Connection(e.to_string()))?;

        info!(backend = conn.backend_name(), "connected through url-resolved driver");
        Ok(Self { conn, migrator })
    }
}

#[async_trait]
impl MigrationEngine for AnyEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Url
    }

    async fn apply_all(&mut self) -> EngineResult<MigrationReport> {
        let started = Instant::now();
        let pending = runner::pending(&self.status().await?);
        debug!(count = pending.len(), "applying pending migrations");

        self.migrator.run_direct(&mut self.conn).await?;
        Ok(MigrationReport::completed(MigrationDirection::Up, pending, started))
    }

    async fn revert_all(&mut self) -> EngineResult<MigrationReport> {
        let started = Instant::now();
        let applied = runner::revertible(&self.status().await?);
        debug!(count = applied.len(), "reverting applied migrations");

        self.migrator.undo(&mut self.conn, BEFORE_FIRST_VERSION).await?;
        Ok(MigrationReport::completed(MigrationDirection::Down, applied, started))
    }

    async fn status(&mut self) -> EngineResult<Vec<MigrationInfo>> {
        runner::migration_status(&mut self.conn, &self.migrator).await
    }

    async fn close(self: Box<Self>) {
        match self.conn.close().await {
            Ok(()) => debug!("connection closed"),
            Err(e) => warn!(error = %e, "failed to close connection"),
        }
    }
}

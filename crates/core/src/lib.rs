//! # sqlmig-core
//!
//! Shared building blocks for the `sqlmig` command-line tool: the INI
//! configuration loader, the migration file scaffolder and the error types
//! both of them report.

pub mod config;
pub mod error;
pub mod scaffold;

pub use config::{mask_database_url, ConfigError, EngineKind, MigrateConfig};
pub use error::{CoreError, CoreResult};
pub use scaffold::{normalize_name, scaffold, scaffold_at, MigrationPair};

//! # sqlmig-engine
//!
//! Adapters between the `sqlmig` command line and sqlx's migration engine.
//! A migration directory plus a database address become a
//! [`MigrationEngine`] that can apply or revert everything in one call.

pub mod backends;
pub mod definitions;
pub mod error;
pub mod runner;

pub use backends::{AnyEngine, PostgresEngine};
pub use definitions::{MigrationDirection, MigrationInfo, MigrationReport};
pub use error::{EngineError, EngineResult};
pub use runner::{connect, load_migrator, MigrationEngine};
pub use sqlmig_core::EngineKind;

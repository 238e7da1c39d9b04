//! Engine Backends
//!
//! Two ways of handing a database to the migrator: a natively opened
//! postgres connection, or a bare URL whose scheme picks the driver.

pub mod any;
pub mod postgres;

pub use any::AnyEngine;
pub use postgres::{database_name, PostgresEngine};

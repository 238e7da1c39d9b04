use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use sqlmig_core::MigrateConfig;
use sqlmig_engine::{connect, MigrationEngine, MigrationInfo};

#[derive(Debug, Clone, Args)]
pub struct MigrateArgs {
    /// Migration directory
    #[arg(long)]
    pub dir: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: PathBuf,
}

async fn open_engine(args: &MigrateArgs) -> Result<Box<dyn MigrationEngine>> {
    let config = MigrateConfig::load_with_env(&args.config)?;
    info!(
        url = %config.masked_url(),
        engine = %config.engine,
        dir = %args.dir.display(),
        "opening migration engine"
    );

    let engine = connect(config.engine, &config.database_url, &args.dir).await?;
    Ok(engine)
}

pub async fn up(args: &MigrateArgs) -> Result<()> {
    println!("Upgrade migrations ...");
    let mut engine = open_engine(args).await?;

    let result = engine.apply_all().await;
    engine.close().await;
    let report = result.context("upgrade failed")?;

    for migration in &report.migrations {
        println!("Applied {}/{}", migration.version, migration.description);
    }
    if report.is_empty() {
        println!("No pending migrations");
    }
    info!(count = report.len(), elapsed_ms = report.execution_time_ms as u64, "upgrade finished");

    println!("Upgrade completed!");
    Ok(())
}

pub async fn down(args: &MigrateArgs) -> Result<()> {
    println!("Downgrade migrations ...");
    let mut engine = open_engine(args).await?;

    let result = engine.revert_all().await;
    engine.close().await;
    let report = result.context("downgrade failed")?;

    for migration in &report.migrations {
        println!("Reverted {}/{}", migration.version, migration.description);
    }
    if report.is_empty() {
        println!("No applied migrations");
    }
    info!(count = report.len(), elapsed_ms = report.execution_time_ms as u64, "downgrade finished");

    println!("Downgrade completed!");
    Ok(())
}

pub async fn status(args: &MigrateArgs, json: bool) -> Result<()> {
    let mut engine = open_engine(args).await?;
    let result = engine.status().await;
    engine.close().await;
    let migrations = result.context("failed to read migration status")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&migrations)?);
    } else {
        print!("{}", render_status(&migrations));
    }
    Ok(())
}

fn render_status(migrations: &[MigrationInfo]) -> String {
    let mut out = String::from("Migration Status:\n================\n");

    if migrations.is_empty() {
        out.push_str("No migrations found\n");
        return out;
    }

    for migration in migrations {
        let state = if migration.applied { "applied" } else { "pending" };
        out.push_str(&format!(
            "  [{}] {} {}\n",
            state, migration.version, migration.description
        ));
    }
    out
}

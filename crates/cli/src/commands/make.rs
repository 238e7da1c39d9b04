use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use sqlmig_core::scaffold;

#[derive(Debug, Clone, Args)]
pub struct MakeArgs {
    /// File's name to be created; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// Migration directory
    #[arg(long)]
    pub dir: PathBuf,
}

impl MakeArgs {
    pub fn raw_name(&self) -> String {
        self.name.join(" ")
    }
}

pub fn run(args: &MakeArgs) -> Result<()> {
    let pair = scaffold(&args.dir, &args.raw_name())?;
    info!(version = pair.version, name = %pair.name, "migration scaffolded");

    for path in [&pair.up, &pair.down] {
        println!("Created file: {}", path.display());
    }
    Ok(())
}

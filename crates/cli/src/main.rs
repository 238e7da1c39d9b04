mod commands;
mod logging;

use clap::{Parser, Subcommand};
use commands::*;

#[derive(Parser)]
#[command(name = "sqlmig")]
#[command(about = "A command-line migration tool", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make empty migration files
    Make(make::MakeArgs),

    /// Run upgrade migration
    Up(migrate::MigrateArgs),

    /// Run downgrade migration
    Down(migrate::MigrateArgs),

    /// Show which migrations are applied and which are pending
    Status {
        #[command(flatten)]
        target: migrate::MigrateArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli.command).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Make(args) => make::run(&args),
        Commands::Up(args) => migrate::up(&args).await,
        Commands::Down(args) => migrate::down(&args).await,
        Commands::Status { target, json } => migrate::status(&target, json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_make_joins_name_words() {
        let cli = Cli::try_parse_from(["sqlmig", "make", "add", "users", "--dir", "db"]).unwrap();
        match cli.command {
            Commands::Make(args) => {
                assert_eq!(args.name, vec!["add", "users"]);
                assert_eq!(args.dir, PathBuf::from("db"));
            }
            _ => panic!("expected make"),
        }
    }

    #[test]
    fn test_up_requires_config() {
        let err = Cli::try_parse_from(["sqlmig", "up", "--dir", "db"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_make_requires_dir_and_name() {
        assert!(Cli::try_parse_from(["sqlmig", "make", "init"]).is_err());
        assert!(Cli::try_parse_from(["sqlmig", "make", "--dir", "db"]).is_err());
    }

    #[test]
    fn test_down_and_status_parse() {
        let cli = Cli::try_parse_from([
            "sqlmig", "-vv", "down", "--dir", "db", "--config", "migrate.ini",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Down(ref args) if args.config == PathBuf::from("migrate.ini")));

        let cli = Cli::try_parse_from([
            "sqlmig", "status", "--dir", "db", "--config", "migrate.ini", "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Status { json: true, .. }));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        let err = Cli::try_parse_from(["sqlmig", "sideways"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}

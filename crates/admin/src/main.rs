//! portal-admin: operator commands for the portal.
//!
//! Resource catalog seeding, marketplace custody migration and master
//! account provisioning on the game server.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "portal-admin",
    about = "Portal operator commands",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert or refresh the default resource catalog.
    SeedResources {
        /// Portal PostgreSQL database.
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: String,
    },

    /// Move active marketplace sales into master account custody.
    MigrateSales {
        /// Portal PostgreSQL database.
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: String,

        /// Analyse and report without changing anything.
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,

        /// Transfer legacy characters to the master account instead of
        /// cancelling their sales.
        #[arg(long)]
        move_to_master: bool,
    },

    /// Create the master account that holds listed characters.
    CreateMasterAccount {
        /// Login to create. Defaults to MARKETPLACE_MASTER_ACCOUNT.
        #[arg(long)]
        account_name: Option<String>,

        /// Replace the password if the account already exists.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("portal_admin=info".parse()?)
                .add_directive("portal_marketplace=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::SeedResources { database_url } => {
            commands::seed::run(&database_url).await?;
        }
        Commands::MigrateSales {
            database_url,
            dry_run,
            force,
            move_to_master,
        } => {
            commands::migrate_sales::run(&database_url, dry_run, force, move_to_master).await?;
        }
        Commands::CreateMasterAccount {
            account_name,
            force,
        } => {
            commands::master_account::run(account_name, force).await?;
        }
    }

    Ok(())
}

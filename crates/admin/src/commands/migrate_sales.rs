use std::io;

use anyhow::{bail, Context};
use portal_marketplace::config::MarketplaceConfig;
use portal_marketplace::ledger::PgSaleLedger;
use portal_marketplace::lineage::LineageStore;
use portal_marketplace::migration::{
    ActionMode, CustodyMigration, MigrationOptions, MigrationRun, PromptConfirmation,
};

pub async fn run(
    database_url: &str,
    dry_run: bool,
    force: bool,
    move_to_master: bool,
) -> anyhow::Result<()> {
    let config = MarketplaceConfig::from_env()?;

    let pool = portal_db::create_pool(database_url)
        .await
        .context("Failed to connect to portal database")?;
    let ledger = PgSaleLedger::new(pool);
    let store = LineageStore::connect(&config.lineage_database_url).await?;

    let options = MigrationOptions {
        dry_run,
        force,
        mode: if move_to_master {
            ActionMode::MoveToMaster
        } else {
            ActionMode::Cancel
        },
    };

    let migration = CustodyMigration::new(&ledger, &store, &config.master_account);
    let mut confirmation = PromptConfirmation::new(io::stdin().lock(), io::stdout());
    let mut out = io::stdout();

    match migration.run(options, &mut confirmation, &mut out).await? {
        MigrationRun::Completed { report, .. } if report.failed() > 0 => {
            bail!("{} sales could not be processed", report.failed())
        }
        _ => Ok(()),
    }
}

use anyhow::Context;
use portal_marketplace::config::MarketplaceConfig;
use portal_marketplace::lineage::LineageStore;
use portal_marketplace::provisioning::provision_master_account;

pub async fn run(account_name: Option<String>, force: bool) -> anyhow::Result<()> {
    let config = MarketplaceConfig::from_env()?;
    let login = account_name.unwrap_or(config.master_account);

    let store = LineageStore::connect(&config.lineage_database_url)
        .await
        .context("Failed to connect to game database")?;

    let outcome = provision_master_account(&store, &login, force).await?;

    let action = if outcome.replaced_existing { "updated" } else { "created" };
    println!("Master account '{}' {action}.", outcome.login);
    println!();
    println!("  Login:    {}", outcome.login);
    println!("  Password: {}", outcome.credential.plaintext);
    println!();
    println!("This password is shown once and is not stored. Keep it somewhere safe.");

    if !outcome.verified {
        tracing::warn!(login = %outcome.login, "Account could not be read back after the write");
        println!("WARNING: the account could not be found after writing it. Check the game database.");
    }
    Ok(())
}

use anyhow::Context;
use portal_core::catalog::DEFAULT_CATALOG;
use portal_db::models::resource::UpsertResource;
use portal_db::repositories::resource_repo::{ResourceRepo, UpsertOutcome};

pub async fn run(database_url: &str) -> anyhow::Result<()> {
    let pool = portal_db::create_pool(database_url)
        .await
        .context("Failed to connect to portal database")?;
    portal_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let (mut created, mut updated, mut unchanged) = (0, 0, 0);
    for entry in DEFAULT_CATALOG {
        let outcome = ResourceRepo::upsert(&pool, &UpsertResource::from(entry))
            .await
            .with_context(|| format!("Failed to seed resource '{}'", entry.name))?;
        match outcome {
            UpsertOutcome::Created => {
                created += 1;
                println!("  + {}", entry.name);
            }
            UpsertOutcome::Updated => {
                updated += 1;
                println!("  ~ {}", entry.name);
            }
            UpsertOutcome::Unchanged => unchanged += 1,
        }
    }

    tracing::info!(created, updated, unchanged, "Resource catalog seeded");
    println!(
        "\n{} resources: {created} created, {updated} updated, {unchanged} unchanged",
        DEFAULT_CATALOG.len()
    );
    Ok(())
}

//! Migrate command - applies or reverts the PostgreSQL storage schema

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{storage_migrations, Migrator, PostgresMigrator, StorageConfig};

/// Arguments for the migrate command
#[derive(Args, Clone, Debug)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

/// Run the migrations against the configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let StorageConfig::Postgres(pg_config) = config.storage.to_storage_config()? else {
        anyhow::bail!("Migrations require storage.backend = \"postgres\"");
    };

    let pool = pg_config.connect().await?;
    let migrator = PostgresMigrator::new(pool, storage_migrations());

    if args.revert {
        match migrator.revert().await? {
            Some(version) => info!("Reverted migration {}", version),
            None => info!("No migrations to revert"),
        }
    } else {
        migrator.run().await?;
        info!("Schema at version {:?}", migrator.version().await?);
    }

    Ok(())
}

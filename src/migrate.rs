//! Database migration utilities

use std::path::Path;

use anyhow::Result;
use sqlx_migrator::{Migrate, Plan};

use crate::config::Config;

/// Run all database migrations, creating the database if needed.
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!("running database migrations");

    let pool = crate::db::create_pool(&config.database.url, 1).await?;

    let migrator = mealweek_store::migrator()?;
    let mut conn = pool.acquire().await?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;
    drop(conn);

    pool.close().await;

    tracing::info!("migrations completed");

    Ok(())
}

/// Drop the database file if it exists and recreate it with migrations.
pub async fn reset(config: &Config) -> Result<()> {
    let path = config
        .database
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");

    if Path::new(path).exists() {
        std::fs::remove_file(path)?;
        tracing::info!(path, "dropped database");
    } else {
        tracing::info!(path, "database does not exist, nothing to drop");
    }

    migrate(config).await?;

    Ok(())
}

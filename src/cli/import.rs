use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use mealweek_shared::{MealCategory, MealOption};
use mealweek_store::PlanStore;
use serde::Deserialize;
use sqlx::SqlitePool;
use ulid::Ulid;

#[derive(Debug, Deserialize)]
struct ImportOption {
    #[serde(default)]
    id: Option<String>,
    name: String,
    category: String,
    #[serde(default)]
    is_staple: bool,
    #[serde(default)]
    tags: Vec<String>,
}

/// Load meal options from a JSON file into the catalog. Entries without an
/// id get a fresh ULID; unknown categories are rejected rather than coerced.
pub async fn run(pool: &SqlitePool, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let entries: Vec<ImportOption> = serde_json::from_str(&raw)?;

    let mut options = Vec::with_capacity(entries.len());

    for entry in entries {
        if entry.name.trim().is_empty() {
            tracing::warn!("skipping meal option with an empty name");
            continue;
        }

        let category = MealCategory::from_str(entry.category.trim()).map_err(|_| {
            anyhow::anyhow!(
                "unknown meal category `{}` for `{}`",
                entry.category,
                entry.name
            )
        })?;

        options.push(MealOption {
            id: entry.id.unwrap_or_else(|| Ulid::new().to_string()),
            name: entry.name,
            category,
            is_staple: entry.is_staple,
            tags: entry.tags,
        });
    }

    let count = options.len();
    PlanStore::new(pool.clone()).insert_options(&options).await?;

    tracing::info!(count, file = %file.display(), "imported meal options");

    Ok(())
}

use anyhow::Result;
use mealweek_planner::{GenerationConfig, generate_plan};
use mealweek_store::PlanStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;
use time::{Date, OffsetDateTime};

use crate::config::Config;

#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub start_date: Option<Date>,
    pub days: Option<u32>,
    pub seed: Option<u64>,
}

/// One full generation run: load the catalog and the previous plan, build
/// the new plan, persist and archive it.
pub async fn run(config: &Config, pool: &SqlitePool, args: GenerateArgs) -> Result<()> {
    tracing::info!("starting meal plan generation");

    let store = PlanStore::new(pool.clone());

    let catalog = store.load_catalog().await?;
    if catalog.is_empty() {
        tracing::warn!("meal option catalog is empty, the plan will have no selections");
    }

    let previous_plan = store.load_previous_plan(&catalog).await?;

    let generation = GenerationConfig {
        days_to_generate: args.days.unwrap_or(config.planner.days_to_generate),
        allow_staple_repetition: config.planner.allow_staple_repetition,
    };
    let start_date = args
        .start_date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let plan = generate_plan(
        &catalog,
        previous_plan.as_ref(),
        &generation,
        start_date,
        &mut rng,
    )?;

    store.save_plan(&plan).await?;

    tracing::info!(
        week_start = %plan.week_start_date,
        days = plan.days.len(),
        "meal plan saved"
    );

    Ok(())
}

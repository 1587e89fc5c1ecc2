use anyhow::Result;
use mealweek_shared::MealOption;
use mealweek_store::PlanStore;
use sqlx::SqlitePool;

/// Print the current plan, one line per day.
pub async fn run(pool: &SqlitePool) -> Result<()> {
    let store = PlanStore::new(pool.clone());
    let catalog = store.load_catalog().await?;

    let Some(plan) = store.load_current_plan(&catalog).await? else {
        println!("no current plan, run `mealweek generate` first");
        return Ok(());
    };

    println!("week of {}", plan.week_start_date);

    for day in &plan.days {
        println!(
            "{}  breakfast: {:<24} lunch: {:<24} dinner: {}",
            day.date,
            slot(&day.breakfast),
            slot(&day.lunch),
            slot(&day.dinner),
        );
    }

    Ok(())
}

fn slot(meal: &Option<MealOption>) -> &str {
    meal.as_ref().map(|meal| meal.name.as_str()).unwrap_or("-")
}

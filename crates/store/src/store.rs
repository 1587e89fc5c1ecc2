use std::str::FromStr;

use mealweek_shared::{DayPlan, MealCategory, MealOption, Result, WeeklyPlan};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;
use strum::{AsRefStr, Display};
use time::OffsetDateTime;

use crate::table::{CatalogOption, PlanDay};

/// Which stored plan a row belongs to. `Current` is the plan in effect,
/// `Previous` the archived one consulted for repeat avoidance.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum PlanPeriod {
    Current,
    Previous,
}

#[derive(FromRow)]
struct OptionRow {
    id: String,
    name: String,
    category: String,
    is_staple: bool,
    tags: String,
}

impl OptionRow {
    fn into_option(self) -> MealOption {
        // Historical quirk carried over from the legacy sheet data: an
        // unrecognized category lands in Breakfast instead of failing the
        // whole load.
        let category = MealCategory::from_str(self.category.trim()).unwrap_or_else(|_| {
            tracing::warn!(
                id = %self.id,
                category = %self.category,
                "unrecognized meal category, defaulting to Breakfast"
            );
            MealCategory::Breakfast
        });

        let tags = if self.tags.is_empty() {
            vec![]
        } else {
            match serde_json::from_str::<Vec<String>>(&self.tags) {
                Ok(tags) => tags,
                Err(err) => {
                    tracing::warn!(id = %self.id, err = %err, "unreadable tags, ignoring");
                    vec![]
                }
            }
        };

        MealOption {
            id: self.id,
            name: self.name,
            category,
            is_staple: self.is_staple,
            tags,
        }
    }
}

#[derive(FromRow)]
struct PlanDayRow {
    date: i64,
    breakfast: String,
    lunch: String,
    dinner: String,
}

/// SQLite-backed catalog and plan history.
#[derive(Clone)]
pub struct PlanStore {
    pool: SqlitePool,
}

impl PlanStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Loads every usable meal option. Rows with an empty name are dropped
    /// in the query itself.
    pub async fn load_catalog(&self) -> Result<Vec<MealOption>> {
        let statement = Query::select()
            .columns([
                CatalogOption::Id,
                CatalogOption::Name,
                CatalogOption::Category,
                CatalogOption::IsStaple,
                CatalogOption::Tags,
            ])
            .from(CatalogOption::Table)
            .and_where(Expr::col(CatalogOption::Name).not_equals(""))
            .order_by(CatalogOption::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, OptionRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(OptionRow::into_option).collect())
    }

    /// Upserts catalog entries by id.
    pub async fn insert_options(&self, options: &[MealOption]) -> Result<()> {
        for option in options {
            let tags = serde_json::to_string(&option.tags)?;

            let statement = Query::insert()
                .into_table(CatalogOption::Table)
                .columns([
                    CatalogOption::Id,
                    CatalogOption::Name,
                    CatalogOption::Category,
                    CatalogOption::IsStaple,
                    CatalogOption::Tags,
                ])
                .values_panic([
                    option.id.to_owned().into(),
                    option.name.to_owned().into(),
                    option.category.to_string().into(),
                    option.is_staple.into(),
                    tags.into(),
                ])
                .on_conflict(
                    OnConflict::column(CatalogOption::Id)
                        .update_columns([
                            CatalogOption::Name,
                            CatalogOption::Category,
                            CatalogOption::IsStaple,
                            CatalogOption::Tags,
                        ])
                        .to_owned(),
                )
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&self.pool).await?;
        }

        Ok(())
    }

    pub async fn load_previous_plan(&self, catalog: &[MealOption]) -> Result<Option<WeeklyPlan>> {
        self.load_plan(PlanPeriod::Previous, catalog).await
    }

    pub async fn load_current_plan(&self, catalog: &[MealOption]) -> Result<Option<WeeklyPlan>> {
        self.load_plan(PlanPeriod::Current, catalog).await
    }

    async fn load_plan(
        &self,
        period: PlanPeriod,
        catalog: &[MealOption],
    ) -> Result<Option<WeeklyPlan>> {
        let statement = Query::select()
            .columns([
                PlanDay::Date,
                PlanDay::Breakfast,
                PlanDay::Lunch,
                PlanDay::Dinner,
            ])
            .from(PlanDay::Table)
            .and_where(Expr::col(PlanDay::Period).eq(period.to_string()))
            .order_by(PlanDay::Date, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, PlanDayRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        let mut days = Vec::with_capacity(rows.len());

        for row in rows {
            let date = match OffsetDateTime::from_unix_timestamp(row.date) {
                Ok(timestamp) => timestamp.date(),
                Err(err) => {
                    tracing::warn!(
                        period = %period,
                        timestamp = row.date,
                        err = %err,
                        "skipping plan row with unreadable date"
                    );
                    continue;
                }
            };

            let mut day = DayPlan::new(date);
            let slots = [
                (MealCategory::Breakfast, row.breakfast),
                (MealCategory::Lunch, row.lunch),
                (MealCategory::Dinner, row.dinner),
            ];

            for (category, name) in slots {
                if let Some(meal) = find_meal_by_name(&name, category, catalog) {
                    day.set_meal(category, meal.clone());
                }
            }

            days.push(day);
        }

        Ok(WeeklyPlan::from_days(days))
    }

    /// Replaces the current period and immediately archives the same plan as
    /// the new previous period, all in one transaction. The next generation
    /// run therefore avoids repeating what was just planned.
    pub async fn save_plan(&self, plan: &WeeklyPlan) -> Result<()> {
        if plan.days.is_empty() {
            mealweek_shared::bail!("refusing to save a plan with no days");
        }

        let mut tx = self.pool.begin().await?;

        for period in [PlanPeriod::Current, PlanPeriod::Previous] {
            let statement = Query::delete()
                .from_table(PlanDay::Table)
                .and_where(Expr::col(PlanDay::Period).eq(period.to_string()))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        for day in &plan.days {
            let date = day.date.midnight().assume_utc().unix_timestamp();

            for period in [PlanPeriod::Current, PlanPeriod::Previous] {
                let statement = Query::insert()
                    .into_table(PlanDay::Table)
                    .columns([
                        PlanDay::Period,
                        PlanDay::Date,
                        PlanDay::Breakfast,
                        PlanDay::Lunch,
                        PlanDay::Dinner,
                    ])
                    .values_panic([
                        period.to_string().into(),
                        date.into(),
                        slot_name(day, MealCategory::Breakfast).into(),
                        slot_name(day, MealCategory::Lunch).into(),
                        slot_name(day, MealCategory::Dinner).into(),
                    ])
                    .to_owned();

                let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *tx).await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }
}

/// An absent selection persists as an empty value.
fn slot_name(day: &DayPlan, category: MealCategory) -> String {
    day.meal(category)
        .map(|meal| meal.name.to_owned())
        .unwrap_or_default()
}

/// Case-insensitive catalog lookup, preferring a match within the same
/// category before falling back to a name-only match across categories.
/// With duplicate names the first catalog hit wins.
fn find_meal_by_name<'a>(
    name: &str,
    category: MealCategory,
    catalog: &'a [MealOption],
) -> Option<&'a MealOption> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    catalog
        .iter()
        .find(|meal| meal.category == category && meal.name.eq_ignore_ascii_case(name))
        .or_else(|| {
            catalog
                .iter()
                .find(|meal| meal.name.eq_ignore_ascii_case(name))
        })
}

mod catalog_option;
mod plan_day;

use sqlx_migrator::vec_box;
use sqlx_migrator::{Info, Migrator};

pub struct M0_1;

sqlx_migrator::sqlite_migration!(
    M0_1,
    "mealweek",
    "m0_1",
    vec_box![],
    vec_box![catalog_option::CreateTable, plan_day::CreateTable]
);

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(M0_1)])?;

    Ok(migrator)
}

use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::PlanDay;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(PlanDay::Table)
        .col(
            ColumnDef::new(PlanDay::Period)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(ColumnDef::new(PlanDay::Date).big_integer().not_null())
        .col(ColumnDef::new(PlanDay::Breakfast).string().not_null())
        .col(ColumnDef::new(PlanDay::Lunch).string().not_null())
        .col(ColumnDef::new(PlanDay::Dinner).string().not_null())
        .primary_key(Index::create().col(PlanDay::Period).col(PlanDay::Date))
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(PlanDay::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

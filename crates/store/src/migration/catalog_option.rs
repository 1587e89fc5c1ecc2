use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::CatalogOption;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(CatalogOption::Table)
        .col(
            ColumnDef::new(CatalogOption::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(CatalogOption::Name).string().not_null())
        .col(
            ColumnDef::new(CatalogOption::Category)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(CatalogOption::IsStaple)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(CatalogOption::Tags).string().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(CatalogOption::Table).to_owned()
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

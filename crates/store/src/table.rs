use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum CatalogOption {
    Table,
    Id,
    Name,
    Category,
    IsStaple,
    Tags,
}

#[derive(Iden, Clone)]
pub enum PlanDay {
    Table,
    Period,
    Date,
    Breakfast,
    Lunch,
    Dinner,
}

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "festivals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub region: String,
    pub address: String,
    pub start_date: Date,
    pub end_date: Date,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub entry_fee: Option<String>,
    pub latitude: f64,
    pub longitude: f64,

    // Null for seeded festivals
    pub created_by: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

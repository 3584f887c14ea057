//! Dealership and its settings singleton
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dealership")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub default_labor_rate: Decimal,
    pub currency_symbol: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub default_terms: Option<String>,
    pub parts_markup_percent: Decimal,
    pub technicians_see_pricing: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Work order
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub rv_id: Uuid,
    pub customer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub issue_description: String,
    pub labor_hours: Decimal,
    pub labor_rate: Decimal,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub technician_notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub manager_notes: Option<String>,
    pub technician_id: Option<Uuid>,
    pub total_estimate: Decimal,
    #[sea_orm(unique, nullable)]
    pub approval_token: Option<String>,
    pub approval_token_expires_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub customer_notes: Option<String>,
    pub approved_at: Option<DateTimeUtc>,
    pub rejected_at: Option<DateTimeUtc>,
    pub created_time: DateTimeUtc,
    pub last_modified_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use database_model::prelude::PartModel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog part. `price` is the base price; the dealership markup is applied
/// only when the part is copied into a work order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub in_stock_qty: i32,
}

impl From<PartModel> for Part {
    fn from(model: PartModel) -> Self {
        let PartModel {
            id,
            dealership_id,
            name,
            sku,
            description,
            price,
            in_stock_qty,
        } = model;

        Self {
            id,
            dealership_id,
            name,
            sku,
            description,
            price,
            in_stock_qty,
        }
    }
}

impl From<Part> for PartModel {
    fn from(entity: Part) -> Self {
        Self {
            id: entity.id,
            dealership_id: entity.dealership_id,
            name: entity.name,
            sku: entity.sku,
            description: entity.description,
            price: entity.price,
            in_stock_qty: entity.in_stock_qty,
        }
    }
}

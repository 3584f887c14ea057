use database_model::prelude::DealershipModel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dealership record. Doubles as the per-dealership settings singleton read
/// by the pricing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealership {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub default_labor_rate: Decimal,
    pub currency_symbol: String,
    pub default_terms: Option<String>,
    pub parts_markup_percent: Decimal,
    pub technicians_see_pricing: bool,
}

impl From<DealershipModel> for Dealership {
    fn from(model: DealershipModel) -> Self {
        let DealershipModel {
            id,
            name,
            phone,
            email,
            default_labor_rate,
            currency_symbol,
            default_terms,
            parts_markup_percent,
            technicians_see_pricing,
        } = model;

        Self {
            id,
            name,
            phone,
            email,
            default_labor_rate,
            currency_symbol,
            default_terms,
            parts_markup_percent,
            technicians_see_pricing,
        }
    }
}

impl From<Dealership> for DealershipModel {
    fn from(entity: Dealership) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            default_labor_rate: entity.default_labor_rate,
            currency_symbol: entity.currency_symbol,
            default_terms: entity.default_terms,
            parts_markup_percent: entity.parts_markup_percent,
            technicians_see_pricing: entity.technicians_see_pricing,
        }
    }
}

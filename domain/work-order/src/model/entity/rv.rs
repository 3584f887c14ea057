use database_model::prelude::RvModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An RV belongs to exactly one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rv {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub vin: String,
    pub nickname: Option<String>,
    pub notes: Option<String>,
}

impl Rv {
    /// "2021 Winnebago Vista" style label used in customer-facing messages.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

impl From<RvModel> for Rv {
    fn from(model: RvModel) -> Self {
        let RvModel {
            id,
            customer_id,
            year,
            make,
            model,
            vin,
            nickname,
            notes,
        } = model;

        Self {
            id,
            customer_id,
            year,
            make,
            model,
            vin,
            nickname,
            notes,
        }
    }
}

impl From<Rv> for RvModel {
    fn from(entity: Rv) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            year: entity.year,
            make: entity.make,
            model: entity.model,
            vin: entity.vin,
            nickname: entity.nickname,
            notes: entity.notes,
        }
    }
}

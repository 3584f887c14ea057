use database_model::prelude::CustomerModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<CustomerModel> for Customer {
    fn from(model: CustomerModel) -> Self {
        let CustomerModel {
            id,
            dealership_id,
            name,
            email,
            phone,
        } = model;

        Self {
            id,
            dealership_id,
            name,
            email,
            phone,
        }
    }
}

impl From<Customer> for CustomerModel {
    fn from(entity: Customer) -> Self {
        Self {
            id: entity.id,
            dealership_id: entity.dealership_id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
        }
    }
}

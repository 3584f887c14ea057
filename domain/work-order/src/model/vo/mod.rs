pub mod msg;
pub mod pricing;

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::work_order::{WorkOrderPart, WorkOrderStatus};

/// A part requested on a new work order. The unit price is only a fallback,
/// used when the catalog part no longer resolves; otherwise the current
/// catalog price plus markup wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedPart {
    pub part_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkOrder {
    pub rv_id: Uuid,
    pub customer_id: Uuid,
    pub issue_description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub parts: Vec<RequestedPart>,
    pub labor_hours: Decimal,
    /// Defaults to the dealership's configured labor rate.
    pub labor_rate: Option<Decimal>,
    pub status: WorkOrderStatus,
    pub technician_notes: Option<String>,
    pub manager_notes: Option<String>,
    pub technician_id: Option<Uuid>,
}

/// Partial update; `None` leaves a field untouched. Part lines replace the
/// whole collection, prices included, so totals are recomputed from the
/// merged result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderPatch {
    pub issue_description: Option<String>,
    pub photos: Option<Vec<String>>,
    pub parts: Option<Vec<WorkOrderPart>>,
    pub labor_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub status: Option<WorkOrderStatus>,
    pub technician_notes: Option<String>,
    pub manager_notes: Option<String>,
    pub technician_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Sms,
    Email,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeliveryMethod::Sms => "sms",
            DeliveryMethod::Email => "email",
        })
    }
}

impl FromStr for DeliveryMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(DeliveryMethod::Sms),
            "email" => Ok(DeliveryMethod::Email),
            other => Err(anyhow!("invalid delivery method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerDecision {
    Approve,
    Reject,
}

/// Request metadata recorded in the audit log.
#[derive(Debug, Clone, Default)]
pub struct RequesterMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Outcome of probing an approval token without acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenValidation {
    Valid,
    Expired,
    AlreadyProcessed,
    NotFound,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedApproval {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// One month of completed-order revenue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    /// "2026-08" style key.
    pub month: String,
    pub order_count: usize,
    pub revenue: Decimal,
}

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::prelude::ApprovalLogModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::{DeliveryMethod, RequesterMeta};

/// Immutable audit record of the customer approval flow. Rows are only ever
/// appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalLog {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub action: ApprovalAction,
    pub delivery_method: Option<DeliveryMethod>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub notes: Option<String>,
    pub created_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Sent,
    Viewed,
    Approved,
    Rejected,
}

impl ApprovalLog {
    pub fn sent(work_order_id: Uuid, method: DeliveryMethod, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            work_order_id,
            action: ApprovalAction::Sent,
            delivery_method: Some(method),
            ip_address: None,
            user_agent: None,
            notes: None,
            created_time: now,
        }
    }

    pub fn viewed(work_order_id: Uuid, meta: RequesterMeta, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            work_order_id,
            action: ApprovalAction::Viewed,
            delivery_method: None,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            notes: None,
            created_time: now,
        }
    }

    pub fn decided(
        work_order_id: Uuid,
        action: ApprovalAction,
        meta: RequesterMeta,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            work_order_id,
            action,
            delivery_method: None,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            notes,
            created_time: now,
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApprovalAction::Sent => "sent",
            ApprovalAction::Viewed => "viewed",
            ApprovalAction::Approved => "approved",
            ApprovalAction::Rejected => "rejected",
        })
    }
}

impl FromStr for ApprovalAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(ApprovalAction::Sent),
            "viewed" => Ok(ApprovalAction::Viewed),
            "approved" => Ok(ApprovalAction::Approved),
            "rejected" => Ok(ApprovalAction::Rejected),
            other => Err(anyhow!("invalid approval action: {other}")),
        }
    }
}

impl TryFrom<ApprovalLogModel> for ApprovalLog {
    type Error = anyhow::Error;

    fn try_from(model: ApprovalLogModel) -> Result<Self, Self::Error> {
        let ApprovalLogModel {
            id,
            work_order_id,
            action,
            delivery_method,
            ip_address,
            user_agent,
            notes,
            created_time,
        } = model;

        Ok(Self {
            id,
            work_order_id,
            action: action.parse()?,
            delivery_method: delivery_method.as_deref().map(str::parse).transpose()?,
            ip_address,
            user_agent,
            notes,
            created_time,
        })
    }
}

impl From<ApprovalLog> for ApprovalLogModel {
    fn from(entity: ApprovalLog) -> Self {
        Self {
            id: entity.id,
            work_order_id: entity.work_order_id,
            action: entity.action.to_string(),
            delivery_method: entity.delivery_method.map(|method| method.to_string()),
            ip_address: entity.ip_address,
            user_agent: entity.user_agent,
            notes: entity.notes,
            created_time: entity.created_time,
        }
    }
}

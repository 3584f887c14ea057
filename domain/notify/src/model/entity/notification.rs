use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::prelude::NotificationModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user notification created as a side effect of lifecycle transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dealership_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub work_order_id: Option<Uuid>,
    pub read: bool,
    pub created_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    WorkOrderSubmitted,
    WorkOrderApproved,
    WorkOrderRejected,
    CustomerApproved,
    CustomerRejected,
    General,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use NotificationKind::*;
        f.write_str(match self {
            WorkOrderSubmitted => "work_order_submitted",
            WorkOrderApproved => "work_order_approved",
            WorkOrderRejected => "work_order_rejected",
            CustomerApproved => "customer_approved",
            CustomerRejected => "customer_rejected",
            General => "general",
        })
    }
}

impl FromStr for NotificationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use NotificationKind::*;
        match s {
            "work_order_submitted" => Ok(WorkOrderSubmitted),
            "work_order_approved" => Ok(WorkOrderApproved),
            "work_order_rejected" => Ok(WorkOrderRejected),
            "customer_approved" => Ok(CustomerApproved),
            "customer_rejected" => Ok(CustomerRejected),
            "general" => Ok(General),
            other => Err(anyhow!("invalid notification kind: {other}")),
        }
    }
}

impl TryFrom<NotificationModel> for Notification {
    type Error = anyhow::Error;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let NotificationModel {
            id,
            user_id,
            dealership_id,
            title,
            message,
            kind,
            work_order_id,
            is_read,
            created_time,
        } = model;

        Ok(Self {
            id,
            user_id,
            dealership_id,
            title,
            message,
            kind: kind.parse()?,
            work_order_id,
            read: is_read,
            created_time,
        })
    }
}

impl From<Notification> for NotificationModel {
    fn from(entity: Notification) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            dealership_id: entity.dealership_id,
            title: entity.title,
            message: entity.message,
            kind: entity.kind.to_string(),
            work_order_id: entity.work_order_id,
            is_read: entity.read,
            created_time: entity.created_time,
        }
    }
}

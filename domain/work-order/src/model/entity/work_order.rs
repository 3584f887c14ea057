use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::prelude::{WorkOrderModel, WorkOrderPartModel, WorkOrderPhotoModel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::{pricing, WorkOrderPatch};

/// A single service job tied to one RV and one customer. The lifecycle is
/// entirely server-authoritative; `total_estimate` is derived and never
/// accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub rv_id: Uuid,
    pub customer_id: Uuid,
    pub issue_description: String,
    pub photos: Vec<String>,
    pub parts: Vec<WorkOrderPart>,
    pub labor_hours: Decimal,
    pub labor_rate: Decimal,
    pub status: WorkOrderStatus,
    pub technician_notes: Option<String>,
    pub manager_notes: Option<String>,
    pub technician_id: Option<Uuid>,
    pub total_estimate: Decimal,
    /// Present only while the order awaits customer action.
    pub approval_token: Option<String>,
    pub approval_token_expires_at: Option<DateTime<Utc>>,
    pub customer_notes: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_time: DateTime<Utc>,
    pub last_modified_time: DateTime<Utc>,
}

/// Snapshot of a catalog part at the time it was added to the order. The
/// price is copied, not referenced, so later catalog changes leave
/// historical orders untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderPart {
    pub part_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    PendingCustomerApproval,
    CustomerApproved,
    CustomerRejected,
    Completed,
}

impl WorkOrderStatus {
    /// Legal transitions of the strict lifecycle API. `force_set_status`
    /// bypasses this table on purpose.
    pub fn can_transition_to(&self, next: WorkOrderStatus) -> bool {
        use WorkOrderStatus::*;
        matches!(
            (*self, next),
            (Draft, Submitted)
                | (Draft, Completed)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (Approved, PendingCustomerApproval)
                | (Approved, Completed)
                | (PendingCustomerApproval, CustomerApproved)
                | (PendingCustomerApproval, CustomerRejected)
                | (CustomerApproved, Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        use WorkOrderStatus::*;
        matches!(self, Completed | Rejected | CustomerRejected)
    }

    /// States in which the customer decision has already landed.
    pub fn is_customer_decided(&self) -> bool {
        use WorkOrderStatus::*;
        matches!(self, CustomerApproved | CustomerRejected)
    }

    /// Whether entering this state raises a notification.
    pub fn raises_notification(&self) -> bool {
        use WorkOrderStatus::*;
        matches!(
            self,
            Submitted | Approved | Rejected | CustomerApproved | CustomerRejected
        )
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use WorkOrderStatus::*;
        f.write_str(match self {
            Draft => "draft",
            Submitted => "submitted",
            Approved => "approved",
            Rejected => "rejected",
            PendingCustomerApproval => "pending_customer_approval",
            CustomerApproved => "customer_approved",
            CustomerRejected => "customer_rejected",
            Completed => "completed",
        })
    }
}

impl FromStr for WorkOrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use WorkOrderStatus::*;
        match s {
            "draft" => Ok(Draft),
            "submitted" => Ok(Submitted),
            "approved" => Ok(Approved),
            "rejected" => Ok(Rejected),
            "pending_customer_approval" => Ok(PendingCustomerApproval),
            "customer_approved" => Ok(CustomerApproved),
            "customer_rejected" => Ok(CustomerRejected),
            "completed" => Ok(Completed),
            other => Err(anyhow!("invalid work order status: {other}")),
        }
    }
}

impl WorkOrder {
    /// Recomputes `total_estimate` from the current parts and labor fields.
    /// Must run after every structural mutation before the order persists.
    pub fn recompute_total(&mut self) {
        self.total_estimate = pricing::compute_total(&self.parts, self.labor_hours, self.labor_rate);
    }

    /// Merges a partial update into the order and recomputes the total from
    /// the resulting state. The caller validates the status change first.
    pub fn apply(&mut self, patch: WorkOrderPatch, now: DateTime<Utc>) {
        let WorkOrderPatch {
            issue_description,
            photos,
            parts,
            labor_hours,
            labor_rate,
            status,
            technician_notes,
            manager_notes,
            technician_id,
        } = patch;

        if let Some(issue_description) = issue_description {
            self.issue_description = issue_description;
        }
        if let Some(photos) = photos {
            self.photos = photos;
        }
        if let Some(parts) = parts {
            self.parts = parts;
        }
        if let Some(labor_hours) = labor_hours {
            self.labor_hours = labor_hours;
        }
        if let Some(labor_rate) = labor_rate {
            self.labor_rate = labor_rate;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(technician_notes) = technician_notes {
            self.technician_notes = Some(technician_notes);
        }
        if let Some(manager_notes) = manager_notes {
            self.manager_notes = Some(manager_notes);
        }
        if let Some(technician_id) = technician_id {
            self.technician_id = Some(technician_id);
        }

        self.recompute_total();
        self.last_modified_time = now;
    }

    /// Rebuilds the aggregate from its table rows. Photo rows are ordered
    /// by their position column.
    pub fn try_assemble(
        model: WorkOrderModel,
        parts: Vec<WorkOrderPartModel>,
        mut photos: Vec<WorkOrderPhotoModel>,
    ) -> anyhow::Result<Self> {
        let WorkOrderModel {
            id,
            dealership_id,
            rv_id,
            customer_id,
            issue_description,
            labor_hours,
            labor_rate,
            status,
            technician_notes,
            manager_notes,
            technician_id,
            total_estimate,
            approval_token,
            approval_token_expires_at,
            customer_notes,
            approved_at,
            rejected_at,
            created_time,
            last_modified_time,
        } = model;

        photos.sort_by_key(|photo| photo.position);

        Ok(Self {
            id,
            dealership_id,
            rv_id,
            customer_id,
            issue_description,
            photos: photos.into_iter().map(|photo| photo.storage_path).collect(),
            parts: parts.into_iter().map(WorkOrderPart::from).collect(),
            labor_hours,
            labor_rate,
            status: status.parse()?,
            technician_notes,
            manager_notes,
            technician_id,
            total_estimate,
            approval_token,
            approval_token_expires_at,
            customer_notes,
            approved_at,
            rejected_at,
            created_time,
            last_modified_time,
        })
    }

    pub fn to_model(&self) -> WorkOrderModel {
        WorkOrderModel {
            id: self.id,
            dealership_id: self.dealership_id,
            rv_id: self.rv_id,
            customer_id: self.customer_id,
            issue_description: self.issue_description.clone(),
            labor_hours: self.labor_hours,
            labor_rate: self.labor_rate,
            status: self.status.to_string(),
            technician_notes: self.technician_notes.clone(),
            manager_notes: self.manager_notes.clone(),
            technician_id: self.technician_id,
            total_estimate: self.total_estimate,
            approval_token: self.approval_token.clone(),
            approval_token_expires_at: self.approval_token_expires_at,
            customer_notes: self.customer_notes.clone(),
            approved_at: self.approved_at,
            rejected_at: self.rejected_at,
            created_time: self.created_time,
            last_modified_time: self.last_modified_time,
        }
    }

    pub fn part_models(&self) -> Vec<WorkOrderPartModel> {
        self.parts
            .iter()
            .map(|part| WorkOrderPartModel {
                id: Uuid::new_v4(),
                work_order_id: self.id,
                part_id: part.part_id,
                name: part.name.clone(),
                unit_price: part.unit_price,
                quantity: part.quantity,
            })
            .collect()
    }

    pub fn photo_models(&self) -> Vec<WorkOrderPhotoModel> {
        self.photos
            .iter()
            .enumerate()
            .map(|(position, storage_path)| WorkOrderPhotoModel {
                id: Uuid::new_v4(),
                work_order_id: self.id,
                storage_path: storage_path.clone(),
                position: position as i32,
            })
            .collect()
    }
}

impl From<WorkOrderPartModel> for WorkOrderPart {
    fn from(model: WorkOrderPartModel) -> Self {
        Self {
            part_id: model.part_id,
            name: model.name,
            unit_price: model.unit_price,
            quantity: model.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WorkOrderStatus::*;
    use super::*;

    #[test]
    fn legal_transitions() {
        assert!(Draft.can_transition_to(Submitted));
        assert!(Draft.can_transition_to(Completed));
        assert!(Submitted.can_transition_to(Approved));
        assert!(Submitted.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(PendingCustomerApproval));
        assert!(Approved.can_transition_to(Completed));
        assert!(PendingCustomerApproval.can_transition_to(CustomerApproved));
        assert!(PendingCustomerApproval.can_transition_to(CustomerRejected));
        assert!(CustomerApproved.can_transition_to(Completed));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for terminal in [Completed, Rejected, CustomerRejected] {
            assert!(terminal.is_terminal());
            for next in [
                Draft,
                Submitted,
                Approved,
                Rejected,
                PendingCustomerApproval,
                CustomerApproved,
                CustomerRejected,
                Completed,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn skipping_review_is_illegal() {
        assert!(!Draft.can_transition_to(Approved));
        assert!(!Submitted.can_transition_to(Completed));
        assert!(!Submitted.can_transition_to(PendingCustomerApproval));
        assert!(!PendingCustomerApproval.can_transition_to(Completed));
    }

    #[test]
    fn wire_values_round_trip() {
        for (status, wire) in [
            (Draft, "draft"),
            (Submitted, "submitted"),
            (Approved, "approved"),
            (Rejected, "rejected"),
            (PendingCustomerApproval, "pending_customer_approval"),
            (CustomerApproved, "customer_approved"),
            (CustomerRejected, "customer_rejected"),
            (Completed, "completed"),
        ] {
            assert_eq!(status.to_string(), wire);
            assert_eq!(wire.parse::<WorkOrderStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{wire}\"")
            );
        }
    }
}

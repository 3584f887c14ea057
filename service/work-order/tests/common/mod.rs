use std::sync::Mutex;

use architecture::message_queue::MessageQueueProducerTemplate;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use domain_account::model::entity::Dealership;
use domain_work_order::model::{
    entity::work_order::{WorkOrder, WorkOrderPart, WorkOrderStatus},
    vo::msg::StatusChangeMsg,
};

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn dealership(markup_percent: &str) -> Dealership {
    Dealership {
        id: Uuid::new_v4(),
        name: "Sunrise RV".into(),
        phone: Some("555-0100".into()),
        email: Some("service@sunrise-rv.example".into()),
        default_labor_rate: dec("85"),
        currency_symbol: "$".into(),
        default_terms: None,
        parts_markup_percent: dec(markup_percent),
        technicians_see_pricing: false,
    }
}

pub fn work_order(status: WorkOrderStatus) -> WorkOrder {
    let now = Utc::now();
    let mut order = WorkOrder {
        id: Uuid::new_v4(),
        dealership_id: Uuid::new_v4(),
        rv_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        issue_description: "Water pump rattles at idle".into(),
        photos: vec![],
        parts: vec![WorkOrderPart {
            part_id: Uuid::new_v4(),
            name: "Water pump".into(),
            unit_price: dec("274.40"),
            quantity: 1,
        }],
        labor_hours: dec("2.5"),
        labor_rate: dec("145"),
        status,
        technician_notes: None,
        manager_notes: None,
        technician_id: None,
        total_estimate: Decimal::ZERO,
        approval_token: None,
        approval_token_expires_at: None,
        customer_notes: None,
        approved_at: None,
        rejected_at: None,
        created_time: now,
        last_modified_time: now,
    };
    order.recompute_total();
    order
}

/// Captures published status messages for assertions.
#[derive(Default)]
pub struct CapturingProducer {
    pub sent: Mutex<Vec<StatusChangeMsg>>,
}

#[async_trait]
impl MessageQueueProducerTemplate<StatusChangeMsg> for CapturingProducer {
    async fn send_object(
        &self,
        content: &StatusChangeMsg,
        _topic: Option<&str>,
    ) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(content.clone());
        Ok(())
    }
}

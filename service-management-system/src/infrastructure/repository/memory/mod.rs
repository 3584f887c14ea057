mod account;
mod catalog;
mod notify;
mod work_order;

pub use account::MemoryIdentityService;

use std::sync::Mutex;

use dashmap::DashMap;
use uuid::Uuid;

use domain_account::model::entity::{Dealership, Profile};
use domain_notify::model::entity::Notification;
use domain_work_order::model::entity::{ApprovalLog, Customer, Part, Rv, WorkOrder};

/// In-process store for development and tests. Per-key locking comes from
/// the dashmap shards; the customer-decision guard runs inside a single
/// `get_mut` entry so two racing finalizes see exactly one winner.
#[derive(Default)]
pub struct MemoryRepository {
    pub(crate) work_orders: DashMap<Uuid, WorkOrder>,
    pub(crate) parts: DashMap<Uuid, Part>,
    pub(crate) customers: DashMap<Uuid, Customer>,
    pub(crate) rvs: DashMap<Uuid, Rv>,
    pub(crate) dealerships: DashMap<Uuid, Dealership>,
    pub(crate) profiles: DashMap<Uuid, Profile>,
    pub(crate) approval_logs: Mutex<Vec<ApprovalLog>>,
    pub(crate) notifications: DashMap<Uuid, Notification>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

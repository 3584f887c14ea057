mod approval_log;
mod customer;
mod dealership;
mod notification;
mod part;
mod profile;
mod rv;
mod work_order;

use std::sync::Arc;

use crate::infrastructure::database::Database;

/// One repository facade over the sea-orm pool; the domain repo traits are
/// implemented per entity in the sibling modules.
pub struct SeaOrmRepository {
    db: Arc<Database>,
}

impl SeaOrmRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

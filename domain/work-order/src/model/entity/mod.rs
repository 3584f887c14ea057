pub mod approval_log;
pub mod customer;
pub mod part;
pub mod rv;
pub mod work_order;

#[rustfmt::skip]
pub use {
    approval_log::ApprovalLog,
    customer::Customer,
    part::Part,
    rv::Rv,
    work_order::{WorkOrder, WorkOrderPart},
};

mod approval_log;
mod customer;
mod part;
mod rv;
mod work_order;

#[rustfmt::skip]
pub use {
    approval_log::ApprovalLogRepo,
    customer::CustomerRepo,
    part::PartRepo,
    rv::RvRepo,
    work_order::{CustomerDecisionUpdate, WorkOrderRepo},
};

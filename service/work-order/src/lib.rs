mod approval;
mod report;
mod work_order;

#[rustfmt::skip]
pub use {
    approval::ApprovalServiceImpl,
    report::ReportServiceImpl,
    work_order::WorkOrderServiceImpl,
};

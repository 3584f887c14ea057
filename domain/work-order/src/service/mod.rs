mod approval;
mod report;
mod work_order;

#[rustfmt::skip]
pub use {
    approval::ApprovalService,
    report::ReportService,
    work_order::WorkOrderService,
};

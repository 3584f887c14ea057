mod dispatch;
mod status;
mod template;

#[rustfmt::skip]
pub use {
    dispatch::ApprovalDispatchServiceImpl,
    status::StatusNotifyServiceImpl,
};

mod dispatch;
mod sender;
mod status_notify;

#[rustfmt::skip]
pub use {
    dispatch::{ApprovalDispatchService, DispatchReceipt},
    sender::{EmailMessage, EmailSender, SmsSender},
    status_notify::StatusNotifyService,
};

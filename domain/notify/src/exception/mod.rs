use thiserror::Error;

use domain_work_order::exception::WorkOrderException;
use domain_work_order::model::vo::DeliveryMethod;

pub type NotifyResult<T> = Result<T, NotifyException>;

#[derive(Error, Debug)]
pub enum NotifyException {
    /// Lifecycle/approval failures pass through unchanged so callers keep
    /// their distinct not-found/expired/processed handling.
    #[error(transparent)]
    WorkOrder(#[from] WorkOrderException),

    /// The external send failed or timed out. Token issuance is never rolled
    /// back because of this; the dispatcher reports it as a warning.
    #[error("Failed to deliver {method} message: {reason}")]
    DeliveryFailed {
        method: DeliveryMethod,
        reason: String,
    },

    #[error("The customer has no {method} contact on file.")]
    MissingContact { method: DeliveryMethod },

    #[error("Notify internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for NotifyException {
    fn from(e: anyhow::Error) -> Self {
        NotifyException::InternalError { source: e }
    }
}

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::model::entity::work_order::WorkOrderStatus;

pub type WorkOrderResult<T> = Result<T, WorkOrderException>;

#[derive(Error, Debug)]
pub enum WorkOrderException {
    #[error("There is no work order with id: {id}.")]
    WorkOrderNotFound { id: Uuid },

    #[error("There is no customer with id: {id}.")]
    CustomerNotFound { id: Uuid },

    #[error("There is no RV with id: {id}.")]
    RvNotFound { id: Uuid },

    #[error("There is no part with id: {id}.")]
    PartNotFound { id: Uuid },

    #[error("A new work order must start as draft or submitted, got {status}.")]
    InvalidInitialStatus { status: WorkOrderStatus },

    #[error("Illegal status transition: {from} -> {to}.")]
    InvalidStatusTransition {
        from: WorkOrderStatus,
        to: WorkOrderStatus,
    },

    #[error("Labor hours and labor rate must not be negative.")]
    NegativeLabor,

    #[error("There is no work order awaiting approval for this link.")]
    TokenNotFound,

    #[error("The approval link expired at {expired_at}.")]
    TokenExpired { expired_at: DateTime<Utc> },

    #[error("This work order has already been processed.")]
    AlreadyProcessed,

    #[error("The work order was modified concurrently, please retry.")]
    ConcurrentUpdate,

    #[error("Work order internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for WorkOrderException {
    fn from(e: anyhow::Error) -> Self {
        WorkOrderException::InternalError { source: e }
    }
}

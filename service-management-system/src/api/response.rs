use std::fmt;

use actix_web::{http::StatusCode, web::Json, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::{json, Value};

use domain_account::exception::AccountException;
use domain_notify::exception::NotifyException;
use domain_work_order::exception::WorkOrderException;

pub type ApiResult<T> = Result<Json<T>, WebError>;

pub fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// Error envelope every handler returns. The `kind` value is machine
/// readable; the customer approval page switches its messaging on it.
#[derive(Debug)]
pub struct WebError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: &'a str,
}

impl WebError {
    fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind, message = %self.message, "request failed");
        }
        HttpResponse::build(self.status).json(ErrorBody {
            kind: self.kind,
            message: &self.message,
        })
    }
}

impl From<WorkOrderException> for WebError {
    fn from(e: WorkOrderException) -> Self {
        use WorkOrderException::*;
        let (status, kind) = match &e {
            WorkOrderNotFound { .. } | CustomerNotFound { .. } | RvNotFound { .. }
            | PartNotFound { .. } | TokenNotFound => (StatusCode::NOT_FOUND, "not_found"),
            InvalidInitialStatus { .. } | NegativeLabor => (StatusCode::BAD_REQUEST, "validation"),
            InvalidStatusTransition { .. } | ConcurrentUpdate => (StatusCode::CONFLICT, "conflict"),
            TokenExpired { .. } => (StatusCode::GONE, "expired"),
            AlreadyProcessed => (StatusCode::CONFLICT, "already_processed"),
            InternalError { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self::new(status, kind, e.to_string())
    }
}

impl From<AccountException> for WebError {
    fn from(e: AccountException) -> Self {
        use AccountException::*;
        let (status, kind) = match &e {
            MissingField { .. } | PasswordTooShort { .. } | InvalidRole { .. } => {
                (StatusCode::BAD_REQUEST, "validation")
            }
            ProfileNotFound { .. } | DealershipNotFound { .. } => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            CallerUnresolved | InactiveProfile | WrongDealership
            | CapabilityNotGranted { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            IdentityUpstream { .. } => (StatusCode::BAD_GATEWAY, "upstream"),
            InternalError { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self::new(status, kind, e.to_string())
    }
}

impl From<NotifyException> for WebError {
    fn from(e: NotifyException) -> Self {
        use NotifyException::*;
        match e {
            WorkOrder(inner) => inner.into(),
            e @ (DeliveryFailed { .. } | MissingContact { .. }) => {
                Self::new(StatusCode::BAD_GATEWAY, "upstream", e.to_string())
            }
            e @ InternalError { .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for WebError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e.to_string())
    }
}

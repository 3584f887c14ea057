use actix_web::{
    get, post,
    web::{Data, Json, Path},
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use architecture::repository::ReadOnlyRepository;
use domain_notify::{model::entity::Notification, repository::NotificationRepo};

use crate::api::auth::AuthenticatedUser;
use crate::api::response::{success, ApiResult, WebError};
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread: u64,
}

#[tracing::instrument(skip(sp))]
#[get("/notifications")]
pub async fn list_notifications(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<Notification>> {
    Ok(Json(sp.notification_repo.list_by_user(user.id).await?))
}

#[tracing::instrument(skip(sp))]
#[get("/notifications/unread-count")]
pub async fn unread_count(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<UnreadCount> {
    Ok(Json(UnreadCount {
        unread: sp.notification_repo.unread_count(user.id).await?,
    }))
}

#[tracing::instrument(skip(sp))]
#[post("/notifications/{id}/read")]
pub async fn mark_read(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Value> {
    // Only the recipient may mark their notification.
    let owned = sp
        .notification_repo
        .find_by_id(*id)
        .await?
        .filter(|notification: &Notification| notification.user_id == user.id)
        .is_some();
    if !owned {
        return Err(WebError::not_found(format!(
            "There is no notification with id: {}.",
            *id
        )));
    }
    sp.notification_repo.mark_read(*id).await?;
    Ok(success())
}

#[tracing::instrument(skip(sp))]
#[post("/notifications/read-all")]
pub async fn mark_all_read(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Value> {
    sp.notification_repo.mark_all_read(user.id).await?;
    Ok(success())
}

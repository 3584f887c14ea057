use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use domain_account::{
    exception::{AccountException, AccountResult},
    service::IdentityService,
};

/// Admin client of the external auth platform. Requests carry the shared
/// http client's timeout; timeouts and connection failures are reported as
/// retryable so provisioning callers can try again.
#[derive(typed_builder::TypedBuilder)]
pub struct RestIdentityService {
    client: reqwest::Client,
    base_url: String,
    admin_token: String,
}

#[derive(Deserialize)]
struct CreatedIdentity {
    id: Uuid,
}

#[async_trait]
impl IdentityService for RestIdentityService {
    async fn create_identity(&self, email: &str, password: &str) -> AccountResult<Uuid> {
        let response = self
            .client
            .post(format!("{}/admin/users", self.base_url.trim_end_matches('/')))
            .bearer_auth(&self.admin_token)
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(upstream)?;
        let response = check_status(response).await?;
        let created: CreatedIdentity = response.json().await.map_err(upstream)?;
        Ok(created.id)
    }

    async fn delete_identity(&self, identity_id: Uuid) -> AccountResult<()> {
        let response = self
            .client
            .delete(format!(
                "{}/admin/users/{identity_id}",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.admin_token)
            .send()
            .await
            .map_err(upstream)?;
        check_status(response).await?;
        Ok(())
    }
}

fn upstream(e: reqwest::Error) -> AccountException {
    AccountException::IdentityUpstream {
        retryable: e.is_timeout() || e.is_connect(),
        source: e.into(),
    }
}

async fn check_status(response: reqwest::Response) -> AccountResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AccountException::IdentityUpstream {
        retryable: status.is_server_error(),
        source: anyhow::anyhow!("identity provider returned {status}: {body}"),
    })
}

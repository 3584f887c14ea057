use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::AccountResult;

/// Port to the external auth identity provider. Calls carry the configured
/// client timeout; a timed-out call surfaces as a retryable upstream error.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates a login identity and returns its id.
    async fn create_identity(&self, email: &str, password: &str) -> AccountResult<Uuid>;

    /// Deletes a previously created identity. Used as a saga compensation.
    async fn delete_identity(&self, identity_id: Uuid) -> AccountResult<()>;
}

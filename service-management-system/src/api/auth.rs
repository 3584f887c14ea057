use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web::Data, FromRequest, HttpRequest};
use architecture::repository::ReadOnlyRepository;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use domain_account::{exception::AccountException, model::entity::Profile};
use domain_work_order::model::vo::RequesterMeta;

use crate::api::response::WebError;
use crate::config::JwtConfig;
use crate::infrastructure::ServiceProvider;

/// Identity of the bearer-token caller. With no configured secret the token
/// is decoded unverified, trusting the fronting identity platform to have
/// signed it.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = WebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<AuthenticatedUser, WebError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| WebError::unauthorized("Missing authorization header."))?;
    let provider = req
        .app_data::<Data<ServiceProvider>>()
        .ok_or_else(|| WebError::internal("Service provider is not registered."))?;

    let claims = decode_claims(token, provider.config().jwt())?;
    let id = claims
        .sub
        .parse()
        .map_err(|_| WebError::unauthorized("Invalid token subject."))?;
    Ok(AuthenticatedUser { id })
}

fn decode_claims(token: &str, config: &JwtConfig) -> Result<Claims, WebError> {
    let data = match config.secret() {
        Some(secret) => decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        ),
        None => {
            let mut validation = Validation::new(Algorithm::HS256);
            validation.insecure_disable_signature_validation();
            validation.validate_exp = false;
            validation.required_spec_claims.clear();
            decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        }
    }
    .map_err(|_| WebError::unauthorized("Invalid token format."))?;
    Ok(data.claims)
}

/// Resolves the caller to a profile; an unknown identity is a permission
/// failure, not a 404.
pub async fn caller_profile(
    provider: &ServiceProvider,
    user: &AuthenticatedUser,
) -> Result<Profile, WebError> {
    Ok(provider
        .profile_repo
        .find_by_id(user.id)
        .await?
        .ok_or(AccountException::CallerUnresolved)?)
}

/// Request metadata recorded in the customer approval audit log.
pub fn requester_meta(req: &HttpRequest) -> RequesterMeta {
    let ip_address = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|raw| raw.split(',').next().unwrap_or(raw).trim().to_string())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()));
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    RequesterMeta {
        ip_address,
        user_agent,
    }
}

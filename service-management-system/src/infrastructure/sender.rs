use async_trait::async_trait;
use serde_json::json;

use domain_notify::{
    exception::{NotifyException, NotifyResult},
    service::{EmailMessage, EmailSender, SmsSender},
};
use domain_work_order::model::vo::DeliveryMethod;

use crate::config::{EmailConfig, SmsConfig};

/// Twilio-style SMS gateway client.
#[derive(typed_builder::TypedBuilder)]
pub struct TwilioSmsSender {
    client: reqwest::Client,
    config: SmsConfig,
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send(&self, to: &str, body: &str) -> NotifyResult<()> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base().trim_end_matches('/'),
            self.config.account_sid()
        );
        let response = self
            .client
            .post(url)
            .basic_auth(self.config.account_sid(), Some(self.config.auth_token()))
            .form(&[
                ("From", self.config.from_number().as_str()),
                ("To", &normalize_us_number(to)),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| delivery_failed(DeliveryMethod::Sms, e))?;
        check_status(DeliveryMethod::Sms, response).await
    }
}

/// Transactional email relay client posting JSON to the configured endpoint.
#[derive(typed_builder::TypedBuilder)]
pub struct RelayEmailSender {
    client: reqwest::Client,
    config: EmailConfig,
}

#[async_trait]
impl EmailSender for RelayEmailSender {
    async fn send(&self, message: &EmailMessage) -> NotifyResult<()> {
        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(self.config.api_key())
            .json(&json!({
                "from": self.config.from_address(),
                "to": [message.to],
                "subject": message.subject,
                "html": message.html_body,
            }))
            .send()
            .await
            .map_err(|e| delivery_failed(DeliveryMethod::Email, e))?;
        check_status(DeliveryMethod::Email, response).await
    }
}

/// Strips formatting and prefixes the country code, assuming US numbers for
/// bare ten-digit input.
fn normalize_us_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("+1{digits}")
    } else {
        format!("+{digits}")
    }
}

fn delivery_failed(method: DeliveryMethod, e: reqwest::Error) -> NotifyException {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    NotifyException::DeliveryFailed { method, reason }
}

async fn check_status(method: DeliveryMethod, response: reqwest::Response) -> NotifyResult<()> {
    if response.status().is_success() {
        return Ok(());
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(NotifyException::DeliveryFailed {
        method,
        reason: format!("gateway returned {status}: {body}"),
    })
}

/// Dev-mode senders used with the in-memory store: messages are logged, not
/// delivered.
pub struct LogOnlySmsSender;

#[async_trait]
impl SmsSender for LogOnlySmsSender {
    async fn send(&self, to: &str, body: &str) -> NotifyResult<()> {
        tracing::info!(%to, %body, "sms send skipped (memory mode)");
        Ok(())
    }
}

pub struct LogOnlyEmailSender;

#[async_trait]
impl EmailSender for LogOnlyEmailSender {
    async fn send(&self, message: &EmailMessage) -> NotifyResult<()> {
        tracing::info!(to = %message.to, subject = %message.subject, "email send skipped (memory mode)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_us_number;

    #[test]
    fn ten_digit_numbers_get_the_us_prefix() {
        assert_eq!(normalize_us_number("555-014-7000"), "+15550147000");
        assert_eq!(normalize_us_number("(555) 014 7000"), "+15550147000");
    }

    #[test]
    fn longer_numbers_keep_their_country_code() {
        assert_eq!(normalize_us_number("+44 20 7946 0958"), "+442079460958");
    }
}

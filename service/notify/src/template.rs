//! Customer-facing message rendering. The email body goes through
//! handlebars; SMS is a single line of plain text.

use handlebars::Handlebars;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde_json::json;

const ESTIMATE_EMAIL: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Service Estimate</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="text-align: center; padding: 20px 0; border-bottom: 2px solid #2563eb;">
    <h1 style="color: #1e40af; margin: 0; font-size: 24px;">{{dealership_name}}</h1>
  </div>
  <div style="padding: 30px 0;">
    <p style="font-size: 16px;">Hi {{customer_name}},</p>
    <p style="font-size: 16px;">Your service estimate is ready for review.</p>
    <div style="background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <p style="margin: 0 0 10px 0; color: #6b7280; font-size: 14px;">Vehicle</p>
      <p style="margin: 0; font-weight: 600; font-size: 16px;">{{rv_info}}</p>
      <p style="margin: 20px 0 10px 0; color: #6b7280; font-size: 14px;">Estimated Total</p>
      <p style="margin: 0; font-weight: 700; font-size: 24px; color: #2563eb;">{{formatted_total}}</p>
    </div>
    <p style="font-size: 16px;">Please review the full estimate and let us know if you'd like to proceed.</p>
    <div style="text-align: center; padding: 20px 0;">
      <a href="{{approval_link}}" style="display: inline-block; background: #2563eb; color: white; text-decoration: none; padding: 14px 32px; border-radius: 8px; font-weight: 600; font-size: 16px;">View &amp; Approve Estimate</a>
    </div>
    <p style="font-size: 14px; color: #6b7280;">This link expires in 7 days. If you have questions, reply to this email or call {{dealership_name}}.</p>
  </div>
</body>
</html>"#;

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    registry
        .register_template_string("estimate_email", ESTIMATE_EMAIL)
        .expect("estimate email template is well formed");
    registry
});

pub struct EstimateEmail<'a> {
    pub customer_name: &'a str,
    pub dealership_name: &'a str,
    pub rv_info: &'a str,
    pub currency_symbol: &'a str,
    pub total_estimate: Decimal,
    pub approval_link: &'a str,
}

pub fn render_estimate_email(email: &EstimateEmail<'_>) -> anyhow::Result<String> {
    Ok(TEMPLATES.render(
        "estimate_email",
        &json!({
            "customer_name": email.customer_name,
            "dealership_name": email.dealership_name,
            "rv_info": email.rv_info,
            "formatted_total": format_money(email.currency_symbol, email.total_estimate),
            "approval_link": email.approval_link,
        }),
    )?)
}

pub fn estimate_email_subject(dealership_name: &str) -> String {
    format!("Service Estimate Ready - {dealership_name}")
}

pub fn estimate_sms_body(dealership_name: &str, approval_link: &str) -> String {
    format!(
        "Your RV service estimate from {dealership_name} is ready. Review and approve here: {approval_link}"
    )
}

/// Two-decimal display rounding; pricing arithmetic itself never rounds.
pub fn format_money(currency_symbol: &str, amount: Decimal) -> String {
    format!("{currency_symbol}{amount:.2}")
}

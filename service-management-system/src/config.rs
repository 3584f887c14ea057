use getset::Getters;
use serde::Deserialize;

/// Built from `config.yaml` next to the binary plus `APP__`-prefixed
/// environment overrides.
pub fn build_config() -> anyhow::Result<AppConfig> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;
    Ok(config.try_deserialize()?)
}

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct AppConfig {
    #[serde(default)]
    host: HostConfig,
    #[serde(default)]
    db: DatabaseConfig,
    #[serde(default)]
    log: LogConfig,
    #[serde(default)]
    jwt: JwtConfig,
    #[serde(default)]
    http_client: HttpClientConfig,
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    identity: IdentityConfig,
    #[serde(default)]
    sms: SmsConfig,
    #[serde(default)]
    email: EmailConfig,
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct HostConfig {
    #[serde(default = "HostConfig::default_address")]
    bind_address: String,
    #[serde(default = "HostConfig::default_port")]
    bind_port: u16,
}

impl HostConfig {
    fn default_address() -> String {
        "0.0.0.0".to_string()
    }
    fn default_port() -> u16 {
        8080
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::default_address(),
            bind_port: Self::default_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// In-process store for development and tests.
    #[default]
    Memory,
    Postgres,
}

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct DatabaseConfig {
    #[serde(default)]
    kind: DatabaseKind,
    #[serde(default)]
    url: String,
    #[serde(default = "DatabaseConfig::default_timeout_secs")]
    connect_timeout_secs: u64,
}

impl DatabaseConfig {
    fn default_timeout_secs() -> u64 {
        10
    }
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_level")]
    level: String,
    #[serde(default)]
    file_enable: bool,
    #[serde(default = "LogConfig::default_file_path")]
    file_path: String,
    #[serde(default = "LogConfig::default_file_prefix")]
    file_prefix: String,
}

impl LogConfig {
    fn default_level() -> String {
        "info".to_string()
    }
    fn default_file_path() -> String {
        "logs".to_string()
    }
    fn default_file_prefix() -> String {
        "service-management".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            file_enable: false,
            file_path: Self::default_file_path(),
            file_prefix: Self::default_file_prefix(),
        }
    }
}

/// When no secret is configured the bearer token is decoded without
/// signature validation, trusting the fronting identity platform.
#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct JwtConfig {
    #[serde(default)]
    secret: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct HttpClientConfig {
    #[serde(default = "HttpClientConfig::default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "HttpClientConfig::default_user_agent")]
    user_agent: String,
}

impl HttpClientConfig {
    fn default_timeout_secs() -> u64 {
        10
    }
    fn default_user_agent() -> String {
        "service-management-system".to_string()
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            user_agent: Self::default_user_agent(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct SiteConfig {
    /// Public origin the customer approval links point at.
    #[serde(default = "SiteConfig::default_base_url")]
    base_url: String,
}

impl SiteConfig {
    fn default_base_url() -> String {
        "http://localhost:5173".to_string()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
        }
    }
}

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct IdentityConfig {
    #[serde(default)]
    base_url: String,
    #[serde(default)]
    admin_token: String,
}

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct SmsConfig {
    #[serde(default)]
    account_sid: String,
    #[serde(default)]
    auth_token: String,
    #[serde(default)]
    from_number: String,
    #[serde(default = "SmsConfig::default_api_base")]
    api_base: String,
}

impl SmsConfig {
    fn default_api_base() -> String {
        "https://api.twilio.com".to_string()
    }
}

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct EmailConfig {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    from_address: String,
}

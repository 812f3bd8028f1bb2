use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr, time::Duration};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Which concrete mail transport the dispatcher is built with at startup.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    Smtp,
    Resend,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_mail_transport")]
    pub mail_transport: MailTransport,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default)]
    pub smtp_user: String,

    #[serde(default)]
    pub smtp_password: String,

    #[serde(default)]
    pub resend_api_key: Option<String>,

    #[serde(default)]
    pub admin_email: String,

    #[serde(default = "default_email_from")]
    pub email_from: String,

    #[serde(default = "default_contact_rate_limit")]
    pub rate_limit_contact_form: u32,

    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}
fn default_mail_transport() -> MailTransport {
    MailTransport::Smtp
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_email_from() -> String {
    "noreply@resend.dev".to_string()
}
fn default_contact_rate_limit() -> u32 {
    5
}
fn default_rate_limit_window_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            mail_transport: default_mail_transport(),
            smtp_host: default_smtp_host(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            resend_api_key: None,
            admin_email: String::new(),
            email_from: default_email_from(),
            rate_limit_contact_form: default_contact_rate_limit(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!("config/{}", env_name.to_string().to_lowercase()))
                    .required(false),
            )
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.admin_email = fill_or_env(config.admin_email, "APP_ADMIN_EMAIL")?;
        match config.mail_transport {
            MailTransport::Smtp => {
                config.smtp_user = fill_or_env(config.smtp_user, "APP_SMTP_USER")?;
                config.smtp_password = fill_or_env(config.smtp_password, "APP_SMTP_PASSWORD")?;
            }
            MailTransport::Resend => {
                if config.resend_api_key.is_none() {
                    config.resend_api_key = env::var("APP_RESEND_API_KEY").ok();
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Startup validation. Mail credentials are checked here so a
    /// misconfigured deployment fails at boot rather than on the first
    /// submission; `mail_configured` stays as the per-request safety net.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.admin_email.trim().is_empty() {
            errors.push("ADMIN_EMAIL cannot be empty");
        }
        if self.email_from.trim().is_empty() {
            errors.push("EMAIL_FROM cannot be empty");
        }
        match self.mail_transport {
            MailTransport::Smtp => {
                if self.smtp_user.trim().is_empty() || self.smtp_password.trim().is_empty() {
                    errors.push("SMTP_USER and SMTP_PASSWORD must be set for the smtp transport");
                }
            }
            MailTransport::Resend => {
                if self.resend_api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                    errors.push("RESEND_API_KEY must be set for the resend transport");
                }
            }
        }
        if self.rate_limit_contact_form == 0 {
            errors.push("RATE_LIMIT_CONTACT_FORM must be at least 1");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    /// True when everything the mail dispatcher needs is present. Checked per
    /// request before the pipeline touches the body.
    pub fn mail_configured(&self) -> bool {
        if self.admin_email.trim().is_empty() || self.email_from.trim().is_empty() {
            return false;
        }
        match self.mail_transport {
            MailTransport::Smtp => {
                !self.smtp_user.trim().is_empty() && !self.smtp_password.trim().is_empty()
            }
            MailTransport::Resend => self
                .resend_api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty()),
        }
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() { "[MISSING]" } else { "[REDACTED]" }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("mail_transport", &self.mail_transport)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &self.smtp_password.redact())
            .field(
                "resend_api_key",
                &self.resend_api_key.as_deref().unwrap_or("").redact(),
            )
            .field("admin_email", &self.admin_email)
            .field("email_from", &self.email_from)
            .field("rate_limit_contact_form", &self.rate_limit_contact_form)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smtp_transport_requires_credentials() {
        let mut config = AppConfig {
            admin_email: "owner@example.com".to_string(),
            ..AppConfig::default()
        };
        assert!(!config.mail_configured());

        config.smtp_user = "user@gmail.com".to_string();
        config.smtp_password = "app-password".to_string();
        assert!(config.mail_configured());
    }

    #[test]
    fn resend_transport_requires_api_key() {
        let mut config = AppConfig {
            admin_email: "owner@example.com".to_string(),
            mail_transport: MailTransport::Resend,
            ..AppConfig::default()
        };
        assert!(!config.mail_configured());

        config.resend_api_key = Some("re_123".to_string());
        assert!(config.mail_configured());
    }

    #[test]
    fn missing_admin_email_is_unconfigured() {
        let config = AppConfig {
            smtp_user: "user".to_string(),
            smtp_password: "pass".to_string(),
            ..AppConfig::default()
        };
        assert!(!config.mail_configured());
    }

    #[test]
    fn cors_origins_split_comma_separated_entries() {
        let config = AppConfig {
            cors_allowed_origins: vec![
                "https://a.example,https://b.example".to_string(),
                " https://c.example ".to_string(),
            ],
            ..AppConfig::default()
        };
        assert_eq!(
            config.cors_origins(),
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = AppConfig {
            smtp_password: "super-secret".to_string(),
            resend_api_key: Some("re_live_key".to_string()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("re_live_key"));
    }
}

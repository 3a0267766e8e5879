use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_notification::{EmailJsConfig, SmtpConfig};
use serde::Deserialize;
use std::env;
use validator::Validate;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ContactConfig {
    /// Destination of every contact message
    #[serde(default = "default_to_email")]
    #[validate(email)]
    pub to_email: String,
    /// File holding the last successful submission time
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            to_email: default_to_email(),
            storage_path: default_storage_path(),
        }
    }
}

fn default_to_email() -> String {
    "contact@folio.localhost".to_string()
}

fn default_storage_path() -> String {
    ".folio/contact.json".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    EmailJs,
    Smtp,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DeliveryConfig {
    #[serde(default)]
    pub transport: Transport,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of the pretty console format
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (EMAILJS_SERVICE_ID, CONTACT_TO_EMAIL, etc.)
    /// 2. Prefixed environment variables (FOLIO__EMAILJS__SERVICE_ID, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("contact.to_email", default_to_email())?
            .set_default("contact.storage_path", default_storage_path())?
            .set_default("delivery.transport", "emailjs")?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in [
            ("EMAILJS_SERVICE_ID", "emailjs.service_id"),
            ("EMAILJS_TEMPLATE_ID", "emailjs.template_id"),
            ("EMAILJS_PUBLIC_KEY", "emailjs.public_key"),
            ("CONTACT_TO_EMAIL", "contact.to_email"),
        ] {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.contact
            .validate()
            .map_err(|e| format!("Invalid contact configuration: {e}"))?;

        match self.delivery.transport {
            Transport::EmailJs => {
                let emailjs = &self.emailjs;
                if emailjs.service_id.is_empty()
                    || emailjs.template_id.is_empty()
                    || emailjs.public_key.is_empty()
                {
                    return Err(
                        "EmailJS service_id, template_id and public_key must be set".to_string()
                    );
                }
            }
            Transport::Smtp => {
                let Some(smtp) = &self.smtp else {
                    return Err("SMTP transport selected but [smtp] is not configured".to_string());
                };
                if smtp.port == 0 {
                    return Err("SMTP port must be greater than 0".to_string());
                }
            }
        }

        Ok(())
    }
}

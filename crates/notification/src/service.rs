//! SMTP delivery using lettre

use folio_contact::{Delivery, DeliveryError, OutboundMessage};
use lettre::{
    Message, SmtpTransport, Transport, message::header,
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

pub const CONTACT_SUBJECT: &str = "New message from contact page";

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub from_address: String,
}

/// Relays contact messages through an SMTP server.
#[derive(Clone)]
pub struct SmtpDelivery {
    mailer: SmtpTransport,
    from: String,
}

impl SmtpDelivery {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mailer = if config.username.is_empty() || config.password.is_empty() {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                from = %config.from_address,
                "SMTP delivery initialized with authentication and TLS"
            );

            let creds = Credentials::new(config.username.clone(), config.password.clone());

            SmtpTransport::relay(&config.host)?
                .port(config.port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_address.clone(),
        })
    }

    async fn send_plain(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        tracing::info!("Sending email text plain");

        let email = Message::builder()
            .from(self.from.parse()?)
            .reply_to(message.reply_to.parse()?)
            .to(message.to_email.parse()?)
            .subject(CONTACT_SUBJECT)
            .header(header::ContentType::TEXT_PLAIN)
            .body(plain_body(message))?;

        self.mailer.send(&email)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl Delivery for SmtpDelivery {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        Ok(self.send_plain(message).await?)
    }
}

pub fn plain_body(message: &OutboundMessage) -> String {
    format!(
        "Email: {}\nName: {}\nMessage:\n{}\n",
        message.reply_to, message.from_name, message.message
    )
}

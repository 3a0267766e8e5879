pub mod config;
pub mod observability;

pub use crate::config::Config;

use anyhow::Context;
use crate::config::Transport;
use folio_contact::{ContactSubmissionFlow, Delivery, FileStore, SystemClock};
use folio_notification::{EmailJs, SmtpDelivery};

/// Contact form wired to the system clock, the on-disk store and the
/// configured transport.
pub type ContactFlow = ContactSubmissionFlow<SystemClock, FileStore, Box<dyn Delivery>>;

pub fn create_delivery(config: &Config) -> anyhow::Result<Box<dyn Delivery>> {
    let delivery: Box<dyn Delivery> = match config.delivery.transport {
        Transport::EmailJs => Box::new(EmailJs::new(config.emailjs.clone())),
        Transport::Smtp => {
            let smtp = config
                .smtp
                .as_ref()
                .context("SMTP transport selected but [smtp] is not configured")?;
            Box::new(SmtpDelivery::new(smtp)?)
        }
    };

    Ok(delivery)
}

pub fn create_store(config: &Config) -> FileStore {
    FileStore::new(&config.contact.storage_path)
}

pub fn create_flow(config: &Config) -> anyhow::Result<ContactFlow> {
    Ok(ContactSubmissionFlow::new(
        SystemClock,
        create_store(config),
        create_delivery(config)?,
        &config.contact.to_email,
    ))
}

use std::time::Duration;

use anyhow::Result;
use folio::config::Config;
use folio_contact::{Clock, Field, KeyValueStore, LAST_SENT_KEY, SystemClock, store};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub struct SubmitInput {
    pub name: String,
    pub email: String,
    pub message: String,
    pub company: String,
}

pub async fn submit(config: Config, input: SubmitInput) -> Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let mut flow = folio::create_flow(&config)?;
    flow.open();
    flow.update_field(Field::Name, input.name);
    flow.update_field(Field::Email, input.email);
    flow.update_field(Field::Message, input.message);
    flow.update_field(Field::Company, input.company);

    flow.submit().await?;

    println!("{}", flow.status());

    if let Some(deadline) = flow.dismiss_at() {
        let wait = deadline.saturating_sub(SystemClock.now_ms());
        tokio::time::sleep(Duration::from_millis(wait)).await;
        flow.tick();
    }

    Ok(())
}

pub async fn status(config: Config) -> Result<()> {
    let storage = folio::create_store(&config);

    let Some(last_sent_at) = store::last_sent_at(&storage) else {
        println!("No message sent yet.");
        return Ok(());
    };

    let sent = OffsetDateTime::from_unix_timestamp_nanos(last_sent_at as i128 * 1_000_000)?;
    println!("Last message sent at {}", sent.format(&Rfc3339)?);

    let remaining = folio_contact::cooldown_remaining(&storage, SystemClock.now_ms());
    if remaining > 0 {
        println!("Next message allowed in {}s", remaining.div_ceil(1_000));
    } else {
        println!("Ready to send.");
    }

    Ok(())
}

pub async fn reset(config: Config) -> Result<()> {
    let storage = folio::create_store(&config);
    storage.remove(LAST_SENT_KEY)?;

    tracing::info!(path = %storage.path().display(), "Contact cooldown cleared");

    Ok(())
}

use crate::{
    Clock, Delivery, DeliveryError, Field, FormData, KeyValueStore, OutboundMessage,
    SubmissionState, SubmitError, store, validation,
};

/// Minimum delay between two successful submissions.
pub const COOLDOWN_MS: u64 = 60_000;

/// How long the success message stays visible before the form closes.
pub const DISMISS_DELAY_MS: u64 = 1_200;

pub const SENDING_STATUS: &str = "Sending...";
pub const SUCCESS_STATUS: &str = "Message sent successfully. I'll get back to you soon.";

/// Milliseconds left at `now_ms` before the store accepts another
/// submission, 0 when free.
pub fn cooldown_remaining(store: &impl KeyValueStore, now_ms: u64) -> u64 {
    let Some(last_sent_at) = store::last_sent_at(store) else {
        return 0;
    };

    let elapsed = now_ms.saturating_sub(last_sent_at);

    COOLDOWN_MS.saturating_sub(elapsed)
}

/// One open instance of the contact form.
pub struct ContactSubmissionFlow<C, S, D> {
    clock: C,
    store: S,
    delivery: D,
    to_email: String,
    form: FormData,
    state: SubmissionState,
    status: String,
    open: bool,
    dismiss_at: Option<u64>,
}

impl<C: Clock, S: KeyValueStore, D: Delivery> ContactSubmissionFlow<C, S, D> {
    pub fn new(clock: C, store: S, delivery: D, to_email: impl Into<String>) -> Self {
        Self {
            clock,
            store,
            delivery,
            to_email: to_email.into(),
            form: FormData::default(),
            state: SubmissionState::Idle,
            status: String::new(),
            open: false,
            dismiss_at: None,
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Status line displayed under the form, empty until the first attempt.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Sending
    }

    pub fn dismiss_at(&self) -> Option<u64> {
        self.dismiss_at
    }

    pub fn to_email(&self) -> &str {
        &self.to_email
    }

    pub fn open(&mut self) {
        self.open = true;
        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }

    /// Hides the form. An in-flight delivery keeps running.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Fires the pending dismissal once its deadline has passed.
    ///
    /// Returns `true` when the form was dismissed by this call.
    pub fn tick(&mut self) -> bool {
        let Some(deadline) = self.dismiss_at else {
            return false;
        };

        if self.clock.now_ms() < deadline {
            return false;
        }

        self.dismiss_at = None;
        self.open = false;
        if self.state == SubmissionState::Succeeded {
            self.state = SubmissionState::Idle;
        }

        tracing::debug!("contact form dismissed");

        true
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Milliseconds until another submission is accepted, 0 when free.
    pub fn cooldown_remaining(&self) -> u64 {
        cooldown_remaining(&self.store, self.clock.now_ms())
    }

    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let message = self.begin_submit()?;
        let outcome = self.deliver(&message).await;

        self.finish_submit(outcome)
    }

    /// Runs every pre-delivery check and, when they all pass, enters
    /// `Sending` and returns the message to hand to the delivery
    /// collaborator.
    pub fn begin_submit(&mut self) -> Result<OutboundMessage, SubmitError> {
        if self.state == SubmissionState::Sending {
            tracing::debug!("submit ignored, delivery already in flight");
            return Err(SubmitError::Reentrant);
        }

        if let Err(err) = self.check() {
            // status text only, the honeypot must stay indistinguishable
            tracing::info!(status = %err, "contact submission rejected");
            self.state = SubmissionState::Idle;
            self.status = err.to_string();

            return Err(err);
        }

        self.state = SubmissionState::Sending;
        self.status = SENDING_STATUS.to_owned();

        Ok(OutboundMessage {
            from_name: self.form.name.trim().to_owned(),
            reply_to: self.form.email.trim().to_owned(),
            message: self.form.message.trim().to_owned(),
            to_email: self.to_email.to_owned(),
        })
    }

    /// Applies the outcome of the delivery started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, outcome: Result<(), DeliveryError>) -> Result<(), SubmitError> {
        if self.state != SubmissionState::Sending {
            tracing::warn!(state = ?self.state, "delivery outcome without a submission in flight");
            return Ok(());
        }

        if let Err(err) = outcome {
            tracing::warn!(error = %err, "contact delivery failed");
            self.state = SubmissionState::Failed(err.to_string());
            let err = SubmitError::Delivery(err);
            self.status = err.to_string();

            return Err(err);
        }

        let now = self.clock.now_ms();

        self.state = SubmissionState::Succeeded;
        self.status = SUCCESS_STATUS.to_owned();
        self.form = FormData::default();
        self.dismiss_at = Some(now.saturating_add(DISMISS_DELAY_MS));

        if let Err(err) = store::set_last_sent_at(&self.store, now) {
            tracing::warn!(error = %err, "failed to persist last sent timestamp");
        }

        tracing::info!("contact message delivered");

        Ok(())
    }

    fn check(&self) -> Result<(), SubmitError> {
        if self.cooldown_remaining() > 0 {
            return Err(SubmitError::RateLimited);
        }

        validation::validate(&self.form)
    }

    #[tracing::instrument(skip_all, fields(to = %message.to_email))]
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        tracing::info!("Sending contact message");

        self.delivery.send(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, MemoryStore};

    struct Unreachable;

    #[async_trait::async_trait]
    impl Delivery for Unreachable {
        async fn send(&self, _message: &OutboundMessage) -> Result<(), DeliveryError> {
            Err(DeliveryError::msg("unreachable"))
        }
    }

    fn flow(now: u64) -> ContactSubmissionFlow<ManualClock, MemoryStore, Unreachable> {
        let mut flow = ContactSubmissionFlow::new(
            ManualClock::new(now),
            MemoryStore::new(),
            Unreachable,
            "me@folio.localhost",
        );
        flow.open();
        flow.update_field(Field::Name, " Jane ");
        flow.update_field(Field::Email, "jane@example.com");
        flow.update_field(Field::Message, "Hello there, general kenobi");
        flow
    }

    #[test]
    fn begin_submit_trims_fields() {
        let mut flow = flow(1_700_000_000_000);
        let message = flow.begin_submit().unwrap();

        assert_eq!(message.from_name, "Jane");
        assert_eq!(message.to_email, "me@folio.localhost");
        assert!(flow.is_submitting());
        assert_eq!(flow.status(), SENDING_STATUS);
    }

    #[test]
    fn second_begin_is_reentrant() {
        let mut flow = flow(1_700_000_000_000);
        flow.begin_submit().unwrap();

        let err = flow.begin_submit().unwrap_err();
        assert!(matches!(err, SubmitError::Reentrant));
        assert!(flow.is_submitting());
        assert_eq!(flow.status(), SENDING_STATUS);
    }

    #[test]
    fn stray_outcome_is_ignored() {
        let mut flow = flow(1_700_000_000_000);
        assert!(flow.finish_submit(Ok(())).is_ok());
        assert_eq!(flow.state(), &SubmissionState::Idle);
        assert_eq!(flow.cooldown_remaining(), 0);
    }

    #[test]
    fn cooldown_counts_down() {
        let flow = flow(1_700_000_000_000);
        store::set_last_sent_at(&flow.store, 1_700_000_000_000 - 15_000).unwrap();
        assert_eq!(flow.cooldown_remaining(), 45_000);

        flow.clock.advance(45_000);
        assert_eq!(flow.cooldown_remaining(), 0);
    }

    #[test]
    fn cooldown_helper_matches_flow() {
        let store = MemoryStore::new();
        assert_eq!(cooldown_remaining(&store, 1_700_000_000_000), 0);

        store::set_last_sent_at(&store, 1_700_000_000_000).unwrap();
        assert_eq!(cooldown_remaining(&store, 1_700_000_010_000), 50_000);
        assert_eq!(cooldown_remaining(&store, 1_700_000_060_000), 0);
    }

    #[test]
    fn future_timestamp_still_limits() {
        let flow = flow(1_700_000_000_000);
        store::set_last_sent_at(&flow.store, 1_700_000_100_000).unwrap();
        assert_eq!(flow.cooldown_remaining(), COOLDOWN_MS);
    }
}

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use folio_contact::{
    ContactSubmissionFlow, Delivery, DeliveryError, Field, ManualClock, MemoryStore,
    OutboundMessage,
};

/// 2023-11-14T22:13:20Z
pub const NOW: u64 = 1_700_000_000_000;
pub const TO: &str = "contact@folio.localhost";

#[derive(Clone, Default)]
pub struct FakeDelivery {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    failing: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FakeDelivery {
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Delivery for FakeDelivery {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::msg("smtp relay unavailable"));
        }

        Ok(())
    }
}

pub type TestFlow = ContactSubmissionFlow<ManualClock, MemoryStore, FakeDelivery>;

pub struct Setup {
    pub flow: TestFlow,
    pub clock: ManualClock,
    pub store: MemoryStore,
    pub delivery: FakeDelivery,
}

pub fn setup() -> Setup {
    let clock = ManualClock::new(NOW);
    let store = MemoryStore::new();
    let delivery = FakeDelivery::default();
    let mut flow =
        ContactSubmissionFlow::new(clock.clone(), store.clone(), delivery.clone(), TO);
    flow.open();

    Setup {
        flow,
        clock,
        store,
        delivery,
    }
}

#[allow(dead_code)]
pub fn fill(
    flow: &mut TestFlow,
    name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
    company: impl Into<String>,
) {
    flow.update_field(Field::Name, name);
    flow.update_field(Field::Email, email);
    flow.update_field(Field::Message, message);
    flow.update_field(Field::Company, company);
}

#[allow(dead_code)]
pub fn fill_valid(flow: &mut TestFlow) {
    fill(
        flow,
        "Jane Doe",
        "jane@example.com",
        "Hello, I would like to discuss a project with you.",
        "",
    );
}

use std::sync::Arc;

use crate::{DeliveryError, OutboundMessage};

/// Capability to hand a validated contact message to an external mailer.
#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError>;
}

#[async_trait::async_trait]
impl<T: Delivery + ?Sized> Delivery for Box<T> {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        (**self).send(message).await
    }
}

#[async_trait::async_trait]
impl<T: Delivery + ?Sized> Delivery for Arc<T> {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        (**self).send(message).await
    }
}

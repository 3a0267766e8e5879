/// Reasons a submit attempt did not end in a delivered message.
///
/// The `Display` output of every variant is the status line shown to the
/// visitor.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A submission is already in flight for this form.
    #[error("")]
    Reentrant,

    #[error("Please wait a minute before sending another message.")]
    RateLimited,

    #[error("Please enter a valid name.")]
    InvalidName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please write a longer message (at least 10 characters).")]
    MessageTooShort,

    #[error("Message is too long (max 2000 characters).")]
    MessageTooLong,

    /// Honeypot field was filled in. Reported with a generic text.
    #[error("Submission blocked.")]
    SpamDetected,

    #[error("Links are not allowed in the message.")]
    LinksNotAllowed,

    #[error("Failed to send. Please try again later.")]
    Delivery(#[source] DeliveryError),
}

impl SubmitError {
    /// Validation-kind errors are raised locally before any external call.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Reentrant | Self::Delivery(_))
    }
}

/// Opaque failure reported by a delivery collaborator.
#[derive(Debug, thiserror::Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(#[from] anyhow::Error);

impl DeliveryError {
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Serde(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

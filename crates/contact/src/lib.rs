//! Contact form submission pipeline.
//!
//! [`ContactSubmissionFlow`] owns the fields of one open contact form,
//! validates them, enforces the submission cooldown and hands the message
//! to a [`Delivery`] implementation. Time and storage are injected through
//! [`Clock`] and [`KeyValueStore`].

mod clock;
mod delivery;
mod error;
mod flow;
pub mod store;
pub mod validation;
mod value_object;

pub use clock::*;
pub use delivery::*;
pub use error::*;
pub use flow::*;
pub use store::{FileStore, KeyValueStore, LAST_SENT_KEY, MemoryStore};
pub use value_object::*;

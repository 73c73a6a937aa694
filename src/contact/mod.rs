//! Contact form relay

pub mod handler;
pub mod mailer;
pub mod submission;
pub mod turnstile;

pub use handler::{ContactService, handler};
pub use mailer::{MailRelay, OutgoingEmail};
pub use turnstile::ChallengeVerifier;

//! Reputation and moderation core for the code-review backend.
//!
//! - [`domain`]: user aggregate, moderation engine, services, and ports.
//! - [`outbound`]: adapters implementing the driven ports.
//! - [`config`]: moderation settings loaded from the environment.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::ModerationSettings;

//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: user repository adapters.

pub mod persistence;

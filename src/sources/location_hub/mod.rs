//! India Location Hub integration
//!
//! - Wire types for the `{success, data}` listing envelopes
//! - `LocationHubClient`, the HTTP implementation of `DirectoryService`

pub mod client;
pub mod types;

pub use client::LocationHubClient;
pub use types::HubEntity;

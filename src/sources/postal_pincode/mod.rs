//! Postal Pincode integration (api.postalpincode.in)

pub mod client;
pub mod types;

pub use client::PostalPincodeClient;
pub use types::{PincodeRecord, PostOffice, BLOCK_NOT_APPLICABLE, STATUS_SUCCESS};

//! Postal Pincode API wire types
//!
//! The service answers `GET /pincode/{code}` with a one-element array.

use serde::{Deserialize, Serialize};

/// `Status` value of a successful lookup.
pub const STATUS_SUCCESS: &str = "Success";

/// `Block` value meaning the post office has no taluka/block.
pub const BLOCK_NOT_APPLICABLE: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PincodeRecord {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// `null` when the lookup failed.
    #[serde(default)]
    pub post_office: Option<Vec<PostOffice>>,
}

impl PincodeRecord {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostOffice {
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub block: Option<String>,
}

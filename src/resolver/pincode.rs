//! Pincode validation and mapping of postal records to address names.

use crate::error::{LocationError, Result};
use crate::sources::postal_pincode::{PincodeRecord, BLOCK_NOT_APPLICABLE};

pub const PINCODE_LENGTH: usize = 6;

pub fn validate_pincode(pincode: &str) -> Result<()> {
    let len = pincode.chars().count();
    if len != PINCODE_LENGTH {
        return Err(LocationError::Validation(format!(
            "pincode must be {} characters, got {}",
            PINCODE_LENGTH, len
        )));
    }
    Ok(())
}

/// Address names taken from the first post office of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub state: String,
    pub district: String,
    /// Empty when the post office reports no block.
    pub taluka: String,
    pub village: String,
}

impl PostalAddress {
    pub fn from_record(pincode: &str, record: &PincodeRecord) -> Result<Self> {
        let office = record
            .post_office
            .as_ref()
            .and_then(|offices| offices.first())
            .filter(|_| record.is_success())
            .ok_or_else(|| {
                LocationError::NotFound(format!(
                    "invalid pincode or data not found: {} ({})",
                    pincode,
                    record.message.as_deref().unwrap_or(&record.status)
                ))
            })?;

        let taluka = match office.block.as_deref() {
            Some(block) if block != BLOCK_NOT_APPLICABLE => block.to_string(),
            _ => String::new(),
        };

        Ok(Self {
            state: office.state.clone(),
            district: office.district.clone(),
            taluka,
            village: office.name.clone(),
        })
    }
}

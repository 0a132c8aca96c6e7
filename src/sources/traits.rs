//! Service traits the resolver depends on.
//!
//! The HTTP clients in this module tree implement them; tests substitute
//! in-memory fakes.

use async_trait::async_trait;

use super::postal_pincode::PincodeRecord;
use crate::error::Result;
use crate::model::AdministrativeEntity;

/// Source of the canonical administrative hierarchy.
///
/// District and taluka listings may include children of other parents; the
/// caller filters them by `parent_name`.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn states(&self) -> Result<Vec<AdministrativeEntity>>;

    async fn districts(&self, state_code: &str) -> Result<Vec<AdministrativeEntity>>;

    async fn talukas(&self, district_code: &str) -> Result<Vec<AdministrativeEntity>>;

    /// Villages are addressed by names rather than codes.
    async fn villages(
        &self,
        state: &str,
        district: &str,
        taluka: &str,
    ) -> Result<Vec<AdministrativeEntity>>;
}

/// Pincode to address lookup.
#[async_trait]
pub trait PostalLookupService: Send + Sync {
    /// The first record the service returns for `pincode`.
    async fn lookup(&self, pincode: &str) -> Result<PincodeRecord>;
}

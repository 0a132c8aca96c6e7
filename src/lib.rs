//! PublicLink location resolver
//!
//! Reconciles free-text address names (state, district, taluka, village)
//! against the canonical Indian administrative hierarchy, and fills an
//! address from a 6-digit pincode.
//!
//! ## Layout
//! - [`matcher`]: exact-then-Levenshtein name matching
//! - [`resolver`]: the tier cascade and pincode resolution
//! - [`sources`]: directory and postal service traits with their HTTP clients
//! - [`config`]: service endpoints and timeouts from the environment

// Core error handling
pub mod error;

pub mod config;
pub mod matcher;
pub mod model;
pub mod resolver;
pub mod sources;

pub use config::ResolverConfig;
pub use error::{LocationError, Result};
pub use matcher::closest_match;
pub use model::{AdministrativeEntity, LocationSelection, Tier};
pub use resolver::{FetchRequest, FetchScope, LocationResolver, TierPhase};
pub use sources::{DirectoryService, LocationHubClient, PostalLookupService, PostalPincodeClient};

//! Per-tier cascade state and fetch requests.

use serde::Serialize;

use crate::error::Result;
use crate::model::{AdministrativeEntity, Tier};
use crate::sources::DirectoryService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPhase {
    /// Parent unresolved, no text, or the last fetch failed.
    #[default]
    Empty,
    /// Candidate fetch in flight.
    Loading,
    /// Candidates loaded but nothing matches the current text.
    Unresolved,
    /// Text matches one candidate.
    Resolved,
}

/// What a tier's candidate list is scoped to. A change of scope forces a refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    States,
    Districts {
        state_code: String,
        state_name: String,
    },
    Talukas {
        district_code: String,
        district_name: String,
    },
    Villages {
        taluka_code: String,
        state: String,
        district: String,
        taluka: String,
    },
}

/// A candidate fetch issued by the cascade.
///
/// `generation` identifies the request within its tier; completing a request
/// whose generation is no longer current is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub tier: Tier,
    pub generation: u64,
    pub scope: FetchScope,
}

impl FetchRequest {
    /// Fetch the candidates for this request and drop entries owned by another parent.
    pub async fn execute(
        &self,
        directory: &dyn DirectoryService,
    ) -> Result<Vec<AdministrativeEntity>> {
        match &self.scope {
            FetchScope::States => directory.states().await,
            FetchScope::Districts {
                state_code,
                state_name,
            } => {
                let districts = directory.districts(state_code).await?;
                Ok(retain_children(districts, state_name))
            }
            FetchScope::Talukas {
                district_code,
                district_name,
            } => {
                let talukas = directory.talukas(district_code).await?;
                Ok(retain_children(talukas, district_name))
            }
            FetchScope::Villages {
                state,
                district,
                taluka,
                ..
            } => directory.villages(state, district, taluka).await,
        }
    }
}

/// Keep entities whose `parent_name` equals `parent_name` ignoring case.
///
/// Entries without a parent reference are dropped.
pub fn retain_children(
    entities: Vec<AdministrativeEntity>,
    parent_name: &str,
) -> Vec<AdministrativeEntity> {
    let wanted = parent_name.to_uppercase();
    entities
        .into_iter()
        .filter(|e| {
            e.parent_name
                .as_deref()
                .is_some_and(|p| p.to_uppercase() == wanted)
        })
        .collect()
}

#[derive(Debug, Default)]
pub(crate) struct TierState {
    pub phase: TierPhase,
    pub candidates: Vec<AdministrativeEntity>,
    /// Candidate matched to the tier's text.
    pub matched: Option<AdministrativeEntity>,
    /// Scope of the loaded or in-flight candidate list.
    pub scope: Option<FetchScope>,
    pub generation: u64,
    pub last_error: Option<String>,
}

impl TierState {
    pub fn resolved_code(&self) -> Option<&str> {
        self.matched.as_ref().and_then(|m| m.code.as_deref())
    }

    /// Drop candidates and any in-flight fetch; the tier has no parent to scope to.
    pub fn reset(&mut self) {
        if self.scope.is_some() || self.phase == TierPhase::Loading {
            self.generation += 1;
        }
        self.phase = TierPhase::Empty;
        self.candidates.clear();
        self.matched = None;
        self.scope = None;
        self.last_error = None;
    }

    pub fn begin_loading(&mut self, scope: FetchScope) {
        self.generation += 1;
        self.phase = TierPhase::Loading;
        self.candidates.clear();
        self.matched = None;
        self.scope = Some(scope);
        self.last_error = None;
    }

    pub fn request(&self, tier: Tier) -> Option<FetchRequest> {
        match (&self.phase, &self.scope) {
            (TierPhase::Loading, Some(scope)) => Some(FetchRequest {
                tier,
                generation: self.generation,
                scope: scope.clone(),
            }),
            _ => None,
        }
    }
}

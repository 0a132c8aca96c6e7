//! Cascading location resolver
//!
//! Keeps the four tiers (state → district → taluka → village) consistent with
//! the form's `LocationSelection`:
//!
//! - each tier's candidates are fetched only once its parent is resolved,
//!   scoped to that parent
//! - each tier's text is matched against its candidates; near misses are
//!   rewritten to the canonical name
//! - selecting a tier clears every tier below it
//!
//! The cascade is driven explicitly. Mutating operations re-run
//! [`LocationResolver::reconcile`] synchronously, which may leave tiers in
//! [`TierPhase::Loading`]. Their fetches are either run in sequence by
//! [`LocationResolver::settle`], or taken from
//! [`LocationResolver::pending_requests`], executed by the caller and fed back
//! through [`LocationResolver::complete_fetch`]. Results of superseded
//! requests are discarded.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use publiclink_location::{
//!     LocationHubClient, LocationResolver, PostalPincodeClient, ResolverConfig, Tier,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ResolverConfig::from_env()?;
//! let mut resolver = LocationResolver::new(
//!     Arc::new(LocationHubClient::new(&config)?),
//!     Arc::new(PostalPincodeClient::new(&config)?),
//! );
//! resolver.settle().await;
//! resolver.select(Tier::State, "Maharastra");
//! resolver.settle().await;
//! assert_eq!(resolver.selection().state, "Maharashtra");
//! # Ok(())
//! # }
//! ```

pub mod pincode;
pub mod tier;

pub use pincode::{validate_pincode, PostalAddress};
pub use tier::{FetchRequest, FetchScope, TierPhase};

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::matcher::closest_match;
use crate::model::{AdministrativeEntity, LocationSelection, Tier};
use crate::sources::{DirectoryService, PostalLookupService};
use tier::TierState;

pub struct LocationResolver {
    directory: Arc<dyn DirectoryService>,
    postal: Arc<dyn PostalLookupService>,
    selection: LocationSelection,
    tiers: [TierState; 4],
    pincode_error: Option<String>,
}

impl LocationResolver {
    /// Start with an empty selection. The states fetch is scheduled immediately.
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        postal: Arc<dyn PostalLookupService>,
    ) -> Self {
        Self::with_selection(directory, postal, LocationSelection::default())
    }

    /// Start from an existing selection, e.g. a saved profile being edited.
    pub fn with_selection(
        directory: Arc<dyn DirectoryService>,
        postal: Arc<dyn PostalLookupService>,
        selection: LocationSelection,
    ) -> Self {
        let mut resolver = Self {
            directory,
            postal,
            selection,
            tiers: Default::default(),
            pincode_error: None,
        };
        resolver.reconcile();
        resolver
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn selection(&self) -> &LocationSelection {
        &self.selection
    }

    /// Hand the selection to the form's save flow.
    pub fn into_selection(self) -> LocationSelection {
        self.selection
    }

    pub fn candidates(&self, tier: Tier) -> &[AdministrativeEntity] {
        &self.tiers[tier.index()].candidates
    }

    pub fn phase(&self, tier: Tier) -> TierPhase {
        self.tiers[tier.index()].phase
    }

    /// Whether the tier can be chosen from: the root always, others once their parent resolved.
    pub fn is_selectable(&self, tier: Tier) -> bool {
        match tier.parent() {
            None => true,
            Some(parent) => self.tiers[parent.index()].resolved_code().is_some(),
        }
    }

    /// Message of the last failed candidate fetch for the tier, if any.
    pub fn tier_error(&self, tier: Tier) -> Option<&str> {
        self.tiers[tier.index()].last_error.as_deref()
    }

    pub fn pincode_error(&self) -> Option<&str> {
        self.pincode_error.as_deref()
    }

    // =========================================================================
    // Selection changes
    // =========================================================================

    /// Set the tier's name and clear every tier below it.
    pub fn select(&mut self, tier: Tier, name: impl Into<String>) {
        self.selection.set(tier, name.into());
        for descendant in tier.descendants() {
            self.selection.set(*descendant, String::new());
        }
        self.reconcile();
    }

    /// Clear the tier and everything below it.
    pub fn clear(&mut self, tier: Tier) {
        self.select(tier, String::new());
    }

    pub fn set_pincode(&mut self, pincode: impl Into<String>) {
        self.selection.pincode = pincode.into();
    }

    /// Forget the tier's loaded list so the next reconcile fetches it again.
    pub fn refresh(&mut self, tier: Tier) {
        let state = &mut self.tiers[tier.index()];
        if state.phase != TierPhase::Loading {
            state.scope = None;
            state.last_error = None;
        }
        self.reconcile();
    }

    // =========================================================================
    // Pincode resolution
    // =========================================================================

    /// Fill state, district, taluka and village from the current pincode.
    ///
    /// Only the names are written; resolving them against the directory is
    /// left to the cascade. On error the selection is untouched and the
    /// error's user message is kept as the pincode error.
    pub async fn lookup_pincode(&mut self) -> Result<()> {
        let pincode = self.selection.pincode.clone();
        match self.fetch_postal_address(&pincode).await {
            Ok(address) => {
                self.pincode_error = None;
                self.selection.state = address.state;
                self.selection.district = address.district;
                self.selection.taluka = address.taluka;
                self.selection.village = address.village;
                self.reconcile();
                Ok(())
            }
            Err(e) => {
                warn!(pincode = %pincode, error = %e, "pincode lookup failed");
                self.pincode_error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    async fn fetch_postal_address(&self, pincode: &str) -> Result<PostalAddress> {
        validate_pincode(pincode)?;
        let record = self.postal.lookup(pincode).await?;
        PostalAddress::from_record(pincode, &record)
    }

    // =========================================================================
    // Cascade
    // =========================================================================

    /// Fetches the cascade is waiting on, at most one per tier.
    pub fn pending_requests(&self) -> Vec<FetchRequest> {
        Tier::ALL
            .iter()
            .filter_map(|tier| self.tiers[tier.index()].request(*tier))
            .collect()
    }

    /// Apply the outcome of a fetch. Returns `false` if the request was superseded.
    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<AdministrativeEntity>>,
    ) -> bool {
        let state = &mut self.tiers[request.tier.index()];
        if state.phase != TierPhase::Loading || state.generation != request.generation {
            debug!(
                tier = %request.tier,
                generation = request.generation,
                current = state.generation,
                "discarding stale candidate list"
            );
            return false;
        }

        match result {
            Ok(candidates) => {
                debug!(tier = %request.tier, count = candidates.len(), "candidates loaded");
                state.candidates = candidates;
                state.phase = TierPhase::Unresolved;
            }
            Err(e) => {
                warn!(tier = %request.tier, error = %e, "error fetching candidates");
                state.candidates.clear();
                state.phase = TierPhase::Empty;
                state.last_error = Some(e.to_string());
            }
        }

        self.reconcile();
        true
    }

    /// Run pending fetches one at a time until no tier is loading.
    pub async fn settle(&mut self) {
        loop {
            let requests = self.pending_requests();
            if requests.is_empty() {
                break;
            }
            for request in requests {
                let result = request.execute(self.directory.as_ref()).await;
                self.complete_fetch(&request, result);
            }
        }
    }

    /// Bring every tier in line with the selection, top-down.
    ///
    /// Tiers whose parent scope changed start loading; loaded tiers are
    /// matched against their text. A correction is written only when it
    /// changes the text, so a second pass is a no-op.
    pub fn reconcile(&mut self) {
        for tier in Tier::ALL {
            let wanted = self.required_scope(tier);
            let state = &mut self.tiers[tier.index()];
            match wanted {
                None => state.reset(),
                Some(scope) if state.scope.as_ref() != Some(&scope) => {
                    debug!(tier = %tier, ?scope, "scope changed, fetching candidates");
                    state.begin_loading(scope);
                }
                Some(_) if state.phase == TierPhase::Loading => {}
                Some(_) => self.rematch(tier),
            }
        }
    }

    /// Scope the tier's candidates must have, or `None` while the parent is unresolved.
    fn required_scope(&self, tier: Tier) -> Option<FetchScope> {
        let matched = |t: Tier| self.tiers[t.index()].matched.as_ref();
        let code = |t: Tier| self.tiers[t.index()].resolved_code().map(str::to_string);

        match tier {
            Tier::State => Some(FetchScope::States),
            Tier::District => Some(FetchScope::Districts {
                state_code: code(Tier::State)?,
                state_name: matched(Tier::State)?.name.clone(),
            }),
            Tier::Taluka => Some(FetchScope::Talukas {
                district_code: code(Tier::District)?,
                district_name: matched(Tier::District)?.name.clone(),
            }),
            Tier::Village => Some(FetchScope::Villages {
                taluka_code: code(Tier::Taluka)?,
                state: matched(Tier::State)?.name.clone(),
                district: matched(Tier::District)?.name.clone(),
                taluka: matched(Tier::Taluka)?.name.clone(),
            }),
        }
    }

    fn rematch(&mut self, tier: Tier) {
        let text = self.selection.get(tier);
        let state = &mut self.tiers[tier.index()];

        if state.last_error.is_some() {
            state.phase = TierPhase::Empty;
            state.matched = None;
            return;
        }
        if text.trim().is_empty() {
            state.phase = TierPhase::Empty;
            state.matched = None;
            return;
        }

        match closest_match(text, &state.candidates).cloned() {
            Some(found) => {
                let correction = (found.name != text).then(|| found.name.clone());
                state.phase = TierPhase::Resolved;
                state.matched = Some(found);
                if let Some(name) = correction {
                    debug!(tier = %tier, from = %text, to = %name, "auto-corrected location name");
                    self.selection.set(tier, name);
                }
            }
            None => {
                state.phase = TierPhase::Unresolved;
                state.matched = None;
            }
        }
    }
}

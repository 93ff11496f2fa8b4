//! Business name suggestions
//!
//! [`BusinessNameSearch`] queries the registry as a business name is typed.
//! Every query is stamped with a generation number; a response only updates
//! the suggestions if no newer query has been issued since, so a slow answer
//! to an old prefix can never replace the answer to the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use core_kernel::OperationMetadata;
use crate::config::BusinessSearchConfig;
use crate::dedup::normalize_name;
use crate::error::PartyError;
use crate::party::{Party, PartyName};
use crate::ports::{BusinessMatch, BusinessSearchPort};

/// Upper bound on suggestions kept from one response
pub const MAX_SEARCH_RESULTS: usize = 50;

/// Current suggestions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Results(Vec<BusinessMatch>),
    /// The last search failed; suggestions are disabled, manual entry is not.
    /// Carries the message to show in place of the suggestions.
    Unavailable(String),
}

/// What happened to one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the current suggestions
    Applied(usize),
    /// A newer query was issued before this one returned
    Stale,
    /// The query was too short; suggestions were cleared without a call
    Cleared,
    Unavailable,
}

/// Search session for one business name field
pub struct BusinessNameSearch {
    port: Arc<dyn BusinessSearchPort>,
    generation: AtomicU64,
    state: RwLock<SearchState>,
    min_query_chars: usize,
    max_results: usize,
    metadata: Option<OperationMetadata>,
}

impl BusinessNameSearch {
    /// Creates a session; `max_results` is capped at [`MAX_SEARCH_RESULTS`]
    pub fn new(port: Arc<dyn BusinessSearchPort>, min_query_chars: usize, max_results: usize) -> Self {
        Self {
            port,
            generation: AtomicU64::new(0),
            state: RwLock::new(SearchState::Idle),
            min_query_chars,
            max_results: max_results.min(MAX_SEARCH_RESULTS),
            metadata: None,
        }
    }

    pub fn from_config(port: Arc<dyn BusinessSearchPort>, config: &BusinessSearchConfig) -> Self {
        Self::new(port, config.min_query_chars, config.max_results)
    }

    /// Sends `metadata` with every query
    pub fn with_metadata(mut self, metadata: OperationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Generation of the most recent query
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn state(&self) -> SearchState {
        self.state.read().await.clone()
    }

    /// Current suggestions; empty when idle or unavailable
    pub async fn results(&self) -> Vec<BusinessMatch> {
        match &*self.state.read().await {
            SearchState::Results(results) => results.clone(),
            _ => Vec::new(),
        }
    }

    /// Clears suggestions and invalidates queries in flight
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = SearchState::Idle;
    }

    /// Runs a query and applies its response if it is still the latest
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();

        if query.chars().count() < self.min_query_chars {
            let mut state = self.state.write().await;
            if self.generation() == generation {
                *state = SearchState::Idle;
            }
            return SearchOutcome::Cleared;
        }

        let response = self
            .port
            .search_businesses(query, self.max_results, self.metadata.clone())
            .await;

        // Compared under the write lock so a newer response cannot land in
        // between the check and the write.
        let mut state = self.state.write().await;
        if self.generation() != generation {
            debug!(query = %query, generation, "Discarding stale business search response");
            return SearchOutcome::Stale;
        }

        match response {
            Ok(mut matches) => {
                matches.truncate(self.max_results);
                let count = matches.len();
                debug!(query = %query, count, "Business search results applied");
                *state = SearchState::Results(matches);
                SearchOutcome::Applied(count)
            }
            Err(error) => {
                let error = PartyError::from(error);
                warn!(query = %query, error = %error, "Business search unavailable");
                *state = SearchState::Unavailable(error.to_string());
                SearchOutcome::Unavailable
            }
        }
    }
}

/// Whether to show the match-selection dialog
///
/// True when there are matches and the business name has been changed from
/// the record's original value.
pub fn should_offer_selection(matches: &[BusinessMatch], original: &Party, current: &Party) -> bool {
    let Some(current_name) = current.name.business_name() else {
        return false;
    };
    let original_name = original.name.business_name().unwrap_or("");
    !matches.is_empty() && normalize_name(current_name) != normalize_name(original_name)
}

/// Copies a selected match's legal name into the party
pub fn apply_selection(party: &mut Party, selected: &BusinessMatch) {
    party.name = PartyName::BusinessName(selected.name.clone());
}

//! Candidate population resolution

use super::predicates::ClientPredicate;
use crate::adapters::store::DataStore;
use crate::domain::records::ClientAttributes;
use crate::domain::{BrandId, CadreError, CandidateSet, ClientId, FilterSpec, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Turns a [`FilterSpec`] into the [`CandidateSet`] of one brand
///
/// Resolution never falls back to [`CandidateSet::Universal`] when a store
/// lookup fails.
pub struct CandidateResolver {
    store: Arc<dyn DataStore>,
}

impl CandidateResolver {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Resolve the clients of `brand` that satisfy every population
    /// dimension of `filter`
    ///
    /// A filter without population dimensions resolves to `Universal` without
    /// touching the store. An explicit result may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`CadreError::Resolution`] if the membership or assignment
    /// lookup fails.
    pub async fn resolve(&self, brand: &BrandId, filter: &FilterSpec) -> Result<CandidateSet> {
        if !filter.has_population_filters() {
            tracing::debug!(brand = %brand, "No population filters, resolving to all clients");
            return Ok(CandidateSet::Universal);
        }

        let profiles = self
            .store
            .fetch_member_profiles(brand, &filter.membership_query())
            .await
            .map_err(CadreError::Resolution)?;
        let fetched = profiles.len();

        let attributes: HashMap<ClientId, ClientAttributes> = profiles
            .into_iter()
            .map(|profile| (profile.client_id, profile.attributes))
            .collect();

        let mut candidates: BTreeSet<ClientId> = attributes.keys().cloned().collect();
        for predicate in ClientPredicate::from_filter(filter) {
            candidates.retain(|id| attributes.get(id).is_some_and(|a| predicate.matches(a)));
        }

        if let Some(query) = filter.assignment_query() {
            if !candidates.is_empty() {
                let assigned = self
                    .store
                    .fetch_assigned_clients(brand, &candidates, &query)
                    .await
                    .map_err(CadreError::Resolution)?;
                candidates.retain(|id| assigned.contains(id));
            }
        }

        tracing::info!(
            brand = %brand,
            memberships = fetched,
            candidates = candidates.len(),
            "Resolved candidate population"
        );

        Ok(CandidateSet::Explicit(candidates))
    }
}

//! Data access traits
//!
//! This module defines the read-only interface the resolver and the dataset
//! generators query through. Implementations are injected, so tests can run
//! against the in-memory store or a wrapper that injects failures.

use crate::domain::records::{
    ClientRecord, CompetitorRecord, MemberProfile, MembershipRecord, PosMaterialRecord,
    ProductRecord, PromotionRecord, SurveyRecord, TeamMemberRecord, VisitRecord,
};
use crate::domain::{
    AssignmentQuery, BrandId, CandidateSet, ClientId, DateRange, MembershipQuery, StoreError,
};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read-only data store
///
/// Every method is scoped to one brand. Population-scoped methods take the
/// resolved [`CandidateSet`]: `Universal` means brand-wide, `Explicit` means
/// "only these clients". Callers never pass an empty explicit set; the
/// generators short-circuit that case before reaching the store.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Short backend name used in logs
    fn backend_name(&self) -> &str;

    /// Test that the store is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> StoreResult<()>;

    /// Fetch brand memberships joined with client attributes
    ///
    /// The store evaluates `query` itself so only matching rows are
    /// transferred.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails. Callers must not fall back to an
    /// unrestricted population.
    async fn fetch_member_profiles(
        &self,
        brand: &BrandId,
        query: &MembershipQuery,
    ) -> StoreResult<Vec<MemberProfile>>;

    /// Return the subset of `candidates` holding an active, non-deleted
    /// assignment that matches `query`
    async fn fetch_assigned_clients(
        &self,
        brand: &BrandId,
        candidates: &BTreeSet<ClientId>,
        query: &AssignmentQuery,
    ) -> StoreResult<BTreeSet<ClientId>>;

    /// Clients holding a membership with the brand
    async fn clients(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<ClientRecord>>;

    /// Visits, optionally bounded by a reporting period on `visited_on`
    async fn visits(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
        period: Option<&DateRange>,
    ) -> StoreResult<Vec<VisitRecord>>;

    async fn memberships(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<MembershipRecord>>;

    async fn competitors(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<CompetitorRecord>>;

    async fn promotions(&self, brand: &BrandId) -> StoreResult<Vec<PromotionRecord>>;

    async fn surveys(&self, brand: &BrandId) -> StoreResult<Vec<SurveyRecord>>;

    async fn products(&self, brand: &BrandId) -> StoreResult<Vec<ProductRecord>>;

    async fn team(&self, brand: &BrandId) -> StoreResult<Vec<TeamMemberRecord>>;

    async fn pos_materials(&self, brand: &BrandId) -> StoreResult<Vec<PosMaterialRecord>>;
}

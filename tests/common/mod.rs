//! Shared fixture and store wrappers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cadre::adapters::store::{DataStore, Fixture, InMemoryStore, StoreResult};
use cadre::domain::records::{
    ClientRecord, CompetitorRecord, MemberProfile, MembershipRecord, PosMaterialRecord,
    ProductRecord, PromotionRecord, SurveyRecord, TeamMemberRecord, VisitRecord,
};
use cadre::domain::{
    AssignmentQuery, BrandId, CandidateSet, ClientId, DateRange, MembershipQuery, StoreError,
};
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Brand "acme" has members c-a, c-b and c-c; c-d only belongs to "other".
pub const FIXTURE: &str = r#"{
    "clients": [
        {"id": "c-a", "name": "Abarrotes Ana", "status": "active", "client_type": "retail",
         "market": "modern", "zone": "north", "state": "NL", "city": "Monterrey",
         "postal_code": "64000", "registered_on": "2023-02-01", "last_visit_on": "2024-01-15"},
        {"id": "c-b", "name": "Bodega, Beto", "status": "inactive", "client_type": "retail",
         "market": "traditional", "zone": "north", "state": "NL", "city": "Monterrey",
         "registered_on": "2022-06-10"},
        {"id": "c-c", "name": "Central Carla", "status": "active", "client_type": "wholesale",
         "market": "modern", "zone": "south", "state": "OAX", "city": "Oaxaca",
         "postal_code": "68000", "registered_on": "2024-03-01", "last_visit_on": "2024-03-05"},
        {"id": "c-d", "name": "Distribuidora Dora", "status": "active", "client_type": "retail",
         "zone": "north"}
    ],
    "memberships": [
        {"brand_id": "acme", "client_id": "c-a", "status": "active", "tier": "gold",
         "points_balance": 500, "lifetime_points": 2000, "total_spent": "1520.455"},
        {"brand_id": "acme", "client_id": "c-b", "status": "active", "tier": "silver",
         "points_balance": 50, "lifetime_points": 300},
        {"brand_id": "acme", "client_id": "c-c", "status": "suspended", "tier": "gold",
         "points_balance": 800, "lifetime_points": 900},
        {"brand_id": "other", "client_id": "c-d", "status": "active", "points_balance": 10}
    ],
    "assignments": [
        {"brand_id": "acme", "client_id": "c-a", "agent_id": "ag-1", "assignment_type": "primary"},
        {"brand_id": "acme", "client_id": "c-b", "agent_id": "ag-1", "assignment_type": "primary",
         "deleted": true},
        {"brand_id": "acme", "client_id": "c-c", "agent_id": "ag-2", "assignment_type": "backup"}
    ],
    "visits": [
        {"id": "v-1", "brand_id": "acme", "client_id": "c-a", "agent_id": "ag-1",
         "visited_on": "2024-01-15", "visit_type": "sale", "order_amount": "120.005",
         "products_discussed": ["cola", "water"], "follow_up": true},
        {"id": "v-2", "brand_id": "acme", "client_id": "c-b", "agent_id": "ag-1",
         "visited_on": "2024-02-10", "visit_type": "audit", "notes": "closed, \"back soon\""},
        {"id": "v-3", "brand_id": "acme", "client_id": "c-c", "agent_id": "ag-2",
         "visited_on": "2024-03-05", "visit_type": "sale"},
        {"id": "v-4", "brand_id": "other", "client_id": "c-d", "agent_id": "ag-9",
         "visited_on": "2024-01-20", "visit_type": "sale"}
    ],
    "competitors": [
        {"id": "k-1", "brand_id": "acme", "client_id": "c-a", "competitor": "RivalCo",
         "observed_price": "10.5", "exclusive_display": true}
    ],
    "promotions": [
        {"id": "p-1", "brand_id": "acme", "name": "Summer", "discount_amount": "15",
         "active": true, "target_tiers": ["gold"]},
        {"id": "p-2", "brand_id": "other", "name": "Winter"}
    ],
    "surveys": [
        {"id": "s-1", "brand_id": "acme", "title": "Shelf check", "question_count": 5,
         "response_count": 12, "active": true}
    ],
    "products": [
        {"sku": "SKU-1", "brand_id": "acme", "name": "Cola 600ml", "unit_price": "14.5",
         "active": true, "presentations": ["600ml", "2l"]}
    ],
    "team": [
        {"id": "t-1", "brand_id": "acme", "name": "Ana Agent", "role": "agent", "zone": "north",
         "active": true, "assigned_markets": ["modern"]}
    ],
    "pos_materials": [
        {"id": "m-1", "brand_id": "acme", "name": "Fridge sticker", "material_type": "sticker",
         "stock": 40, "unit_cost": "2.125", "active": true, "available_zones": ["north", "south"]}
    ]
}"#;

pub fn fixture() -> Fixture {
    serde_json::from_str(FIXTURE).unwrap()
}

pub fn brand() -> BrandId {
    BrandId::new("acme").unwrap()
}

pub fn client(id: &str) -> ClientId {
    ClientId::new(id).unwrap()
}

/// In-memory store that counts lookups and can fail selected queries
///
/// Query names match the [`DataStore`] method names.
pub struct RecordingStore {
    inner: InMemoryStore,
    failing: HashSet<&'static str>,
    pub profile_fetches: AtomicUsize,
    pub assignment_fetches: AtomicUsize,
    pub dataset_queries: AtomicUsize,
}

impl RecordingStore {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            inner: InMemoryStore::new(fixture),
            failing: HashSet::new(),
            profile_fetches: AtomicUsize::new(0),
            assignment_fetches: AtomicUsize::new(0),
            dataset_queries: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, query: &'static str) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn profile_fetches(&self) -> usize {
        self.profile_fetches.load(Ordering::SeqCst)
    }

    pub fn assignment_fetches(&self) -> usize {
        self.assignment_fetches.load(Ordering::SeqCst)
    }

    pub fn dataset_queries(&self) -> usize {
        self.dataset_queries.load(Ordering::SeqCst)
    }

    fn check(&self, query: &str) -> StoreResult<()> {
        if self.failing.contains(query) {
            Err(StoreError::QueryFailed(format!("{query}: simulated outage")))
        } else {
            Ok(())
        }
    }

    fn dataset(&self, query: &str) -> StoreResult<()> {
        self.dataset_queries.fetch_add(1, Ordering::SeqCst);
        self.check(query)
    }
}

#[async_trait]
impl DataStore for RecordingStore {
    fn backend_name(&self) -> &str {
        "recording"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        self.check("test_connection")
    }

    async fn fetch_member_profiles(
        &self,
        brand: &BrandId,
        query: &MembershipQuery,
    ) -> StoreResult<Vec<MemberProfile>> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        self.check("fetch_member_profiles")?;
        self.inner.fetch_member_profiles(brand, query).await
    }

    async fn fetch_assigned_clients(
        &self,
        brand: &BrandId,
        candidates: &BTreeSet<ClientId>,
        query: &AssignmentQuery,
    ) -> StoreResult<BTreeSet<ClientId>> {
        self.assignment_fetches.fetch_add(1, Ordering::SeqCst);
        self.check("fetch_assigned_clients")?;
        self.inner
            .fetch_assigned_clients(brand, candidates, query)
            .await
    }

    async fn clients(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<ClientRecord>> {
        self.dataset("clients")?;
        self.inner.clients(brand, scope).await
    }

    async fn visits(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
        period: Option<&DateRange>,
    ) -> StoreResult<Vec<VisitRecord>> {
        self.dataset("visits")?;
        self.inner.visits(brand, scope, period).await
    }

    async fn memberships(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<MembershipRecord>> {
        self.dataset("memberships")?;
        self.inner.memberships(brand, scope).await
    }

    async fn competitors(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<CompetitorRecord>> {
        self.dataset("competitors")?;
        self.inner.competitors(brand, scope).await
    }

    async fn promotions(&self, brand: &BrandId) -> StoreResult<Vec<PromotionRecord>> {
        self.dataset("promotions")?;
        self.inner.promotions(brand).await
    }

    async fn surveys(&self, brand: &BrandId) -> StoreResult<Vec<SurveyRecord>> {
        self.dataset("surveys")?;
        self.inner.surveys(brand).await
    }

    async fn products(&self, brand: &BrandId) -> StoreResult<Vec<ProductRecord>> {
        self.dataset("products")?;
        self.inner.products(brand).await
    }

    async fn team(&self, brand: &BrandId) -> StoreResult<Vec<TeamMemberRecord>> {
        self.dataset("team")?;
        self.inner.team(brand).await
    }

    async fn pos_materials(&self, brand: &BrandId) -> StoreResult<Vec<PosMaterialRecord>> {
        self.dataset("pos_materials")?;
        self.inner.pos_materials(brand).await
    }
}

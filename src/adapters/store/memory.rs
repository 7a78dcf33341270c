//! In-memory data store
//!
//! Serves every [`DataStore`] query from a [`Fixture`] held in memory. The
//! fixture is a JSON document with one array per data domain, which makes the
//! store usable both from the CLI (`store_target = "memory"`) and in tests.

use super::traits::{DataStore, StoreResult};
use crate::domain::records::{
    AssignmentRecord, ClientRecord, CompetitorRecord, MemberProfile, MembershipRecord,
    PosMaterialRecord, ProductRecord, PromotionRecord, SurveyRecord, TeamMemberRecord,
    VisitRecord,
};
use crate::domain::{
    AssignmentQuery, BrandId, CandidateSet, ClientId, DateRange, MembershipQuery, StoreError,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Complete data set served by [`InMemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub clients: Vec<ClientRecord>,
    pub memberships: Vec<MembershipRecord>,
    pub assignments: Vec<AssignmentRecord>,
    pub visits: Vec<VisitRecord>,
    pub promotions: Vec<PromotionRecord>,
    pub surveys: Vec<SurveyRecord>,
    pub products: Vec<ProductRecord>,
    pub team: Vec<TeamMemberRecord>,
    pub competitors: Vec<CompetitorRecord>,
    pub pos_materials: Vec<PosMaterialRecord>,
}

/// Data store backed by a [`Fixture`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    fixture: Fixture,
}

impl InMemoryStore {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    /// Load a JSON fixture from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StoreError::FixtureUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let fixture: Fixture = serde_json::from_str(&contents).map_err(|e| {
            StoreError::InvalidData(format!("Invalid fixture {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            clients = fixture.clients.len(),
            memberships = fixture.memberships.len(),
            visits = fixture.visits.len(),
            "Loaded in-memory fixture"
        );

        Ok(Self::new(fixture))
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// Ids of every client holding a membership with the brand
    fn member_ids(&self, brand: &BrandId) -> BTreeSet<&ClientId> {
        self.fixture
            .memberships
            .iter()
            .filter(|m| &m.brand_id == brand)
            .map(|m| &m.client_id)
            .collect()
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn fetch_member_profiles(
        &self,
        brand: &BrandId,
        query: &MembershipQuery,
    ) -> StoreResult<Vec<MemberProfile>> {
        let clients: HashMap<&ClientId, &ClientRecord> = self
            .fixture
            .clients
            .iter()
            .map(|c| (&c.id, c))
            .collect();

        Ok(self
            .fixture
            .memberships
            .iter()
            .filter(|m| &m.brand_id == brand && query.matches(m))
            .filter_map(|m| {
                clients.get(&m.client_id).map(|client| MemberProfile {
                    client_id: m.client_id.clone(),
                    attributes: client.attributes(),
                })
            })
            .collect())
    }

    async fn fetch_assigned_clients(
        &self,
        brand: &BrandId,
        candidates: &BTreeSet<ClientId>,
        query: &AssignmentQuery,
    ) -> StoreResult<BTreeSet<ClientId>> {
        Ok(self
            .fixture
            .assignments
            .iter()
            .filter(|a| &a.brand_id == brand && candidates.contains(&a.client_id))
            .filter(|a| query.matches(a))
            .map(|a| a.client_id.clone())
            .collect())
    }

    async fn clients(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<ClientRecord>> {
        let members = self.member_ids(brand);
        Ok(self
            .fixture
            .clients
            .iter()
            .filter(|c| members.contains(&c.id) && scope.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn visits(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
        period: Option<&DateRange>,
    ) -> StoreResult<Vec<VisitRecord>> {
        Ok(self
            .fixture
            .visits
            .iter()
            .filter(|v| &v.brand_id == brand && scope.contains(&v.client_id))
            .filter(|v| period.map_or(true, |p| p.contains(v.visited_on)))
            .cloned()
            .collect())
    }

    async fn memberships(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<MembershipRecord>> {
        Ok(self
            .fixture
            .memberships
            .iter()
            .filter(|m| &m.brand_id == brand && scope.contains(&m.client_id))
            .cloned()
            .collect())
    }

    async fn competitors(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<CompetitorRecord>> {
        Ok(self
            .fixture
            .competitors
            .iter()
            .filter(|c| &c.brand_id == brand && scope.contains(&c.client_id))
            .cloned()
            .collect())
    }

    async fn promotions(&self, brand: &BrandId) -> StoreResult<Vec<PromotionRecord>> {
        Ok(brand_rows(&self.fixture.promotions, brand, |p| &p.brand_id))
    }

    async fn surveys(&self, brand: &BrandId) -> StoreResult<Vec<SurveyRecord>> {
        Ok(brand_rows(&self.fixture.surveys, brand, |s| &s.brand_id))
    }

    async fn products(&self, brand: &BrandId) -> StoreResult<Vec<ProductRecord>> {
        Ok(brand_rows(&self.fixture.products, brand, |p| &p.brand_id))
    }

    async fn team(&self, brand: &BrandId) -> StoreResult<Vec<TeamMemberRecord>> {
        Ok(brand_rows(&self.fixture.team, brand, |t| &t.brand_id))
    }

    async fn pos_materials(&self, brand: &BrandId) -> StoreResult<Vec<PosMaterialRecord>> {
        Ok(brand_rows(&self.fixture.pos_materials, brand, |p| &p.brand_id))
    }
}

fn brand_rows<T: Clone>(rows: &[T], brand: &BrandId, brand_of: impl Fn(&T) -> &BrandId) -> Vec<T> {
    rows.iter()
        .filter(|row| brand_of(row) == brand)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIXTURE: &str = r#"{
        "clients": [
            {"id": "c-1", "name": "Uno", "status": "active", "client_type": "retail"},
            {"id": "c-2", "name": "Dos", "status": "inactive", "client_type": "retail"},
            {"id": "c-3", "name": "Tres", "status": "active", "client_type": "wholesale"}
        ],
        "memberships": [
            {"brand_id": "acme", "client_id": "c-1", "status": "active", "points_balance": 150},
            {"brand_id": "acme", "client_id": "c-2", "status": "active", "points_balance": 50},
            {"brand_id": "other", "client_id": "c-3", "status": "active", "points_balance": 900}
        ],
        "assignments": [
            {"brand_id": "acme", "client_id": "c-1", "agent_id": "ag-1", "assignment_type": "primary"},
            {"brand_id": "acme", "client_id": "c-2", "agent_id": "ag-1", "assignment_type": "primary", "deleted": true}
        ],
        "promotions": [
            {"id": "p-1", "brand_id": "acme", "name": "Summer"},
            {"id": "p-2", "brand_id": "other", "name": "Winter"}
        ]
    }"#;

    fn store() -> InMemoryStore {
        InMemoryStore::new(serde_json::from_str(FIXTURE).unwrap())
    }

    fn brand() -> BrandId {
        BrandId::new("acme").unwrap()
    }

    #[tokio::test]
    async fn test_member_profiles_scoped_to_brand() {
        let profiles = store()
            .fetch_member_profiles(&brand(), &MembershipQuery::default())
            .await
            .unwrap();
        let ids: Vec<&str> = profiles.iter().map(|p| p.client_id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "c-2"]);
    }

    #[tokio::test]
    async fn test_member_profiles_apply_pushed_down_query() {
        let query = MembershipQuery {
            points_balance: crate::domain::PointsRange::new(Some(100), None),
            ..Default::default()
        };
        let profiles = store().fetch_member_profiles(&brand(), &query).await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].attributes.status, "active");
    }

    #[tokio::test]
    async fn test_assigned_clients_ignore_deleted() {
        let candidates: BTreeSet<ClientId> = ["c-1", "c-2"]
            .iter()
            .map(|s| ClientId::new(*s).unwrap())
            .collect();
        let query = AssignmentQuery {
            agent_ids: ["ag-1".to_string()].into(),
            ..Default::default()
        };
        let assigned = store()
            .fetch_assigned_clients(&brand(), &candidates, &query)
            .await
            .unwrap();
        assert_eq!(assigned.len(), 1);
        assert!(assigned.contains(&ClientId::new("c-1").unwrap()));
    }

    #[tokio::test]
    async fn test_clients_restricted_to_members_and_scope() {
        let store = store();
        let all = store.clients(&brand(), &CandidateSet::Universal).await.unwrap();
        assert_eq!(all.len(), 2);

        let scope = CandidateSet::explicit(vec![ClientId::new("c-2").unwrap()]);
        let scoped = store.clients(&brand(), &scope).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].name, "Dos");
    }

    #[tokio::test]
    async fn test_brand_wide_rows() {
        let promotions = store().promotions(&brand()).await.unwrap();
        assert_eq!(promotions.len(), 1);
        assert_eq!(promotions[0].name, "Summer");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        file.flush().unwrap();

        let store = InMemoryStore::from_file(file.path()).unwrap();
        assert_eq!(store.fixture().clients.len(), 3);
    }

    #[test]
    fn test_from_missing_file() {
        let result = InMemoryStore::from_file("does-not-exist.json");
        assert!(matches!(result, Err(StoreError::FixtureUnavailable(_))));
    }
}

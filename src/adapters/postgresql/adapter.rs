//! PostgreSQL adapter implementing the data store trait
//!
//! Queries run against the schema in `migrations/001_initial_schema.sql`.
//! Membership predicates and candidate scoping are rendered into `WHERE`
//! clauses with positional parameters; nothing is string-interpolated.

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::store::{DataStore, StoreResult};
use crate::domain::records::{
    ClientAttributes, ClientRecord, CompetitorRecord, MemberProfile, MembershipRecord,
    PosMaterialRecord, ProductRecord, PromotionRecord, SurveyRecord, TeamMemberRecord,
    VisitRecord,
};
use crate::domain::{
    AssignmentQuery, BrandId, CandidateSet, ClientId, DateRange, MembershipQuery, PointsRange,
    StoreError,
};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio_postgres::types::{FromSql, ToSql};
use tokio_postgres::Row;

/// PostgreSQL implementation of [`DataStore`]
pub struct PostgreSQLStore {
    client: PostgreSQLClient,
}

impl PostgreSQLStore {
    /// Create a new PostgreSQL store
    pub fn new(client: PostgreSQLClient) -> Self {
        Self { client }
    }

    async fn select(&self, base: &str, filter: WhereBuilder, order_by: &str) -> StoreResult<Vec<Row>> {
        let sql = format!("{base}{} ORDER BY {order_by}", filter.clause());
        let params = filter.params();
        self.client.query(&sql, &params).await
    }
}

/// Accumulates `AND`-joined conditions and their positional parameters
#[derive(Default)]
struct WhereBuilder {
    conditions: Vec<String>,
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

impl WhereBuilder {
    fn brand(column: &str, brand: &BrandId) -> Self {
        let mut builder = Self::default();
        builder.bind(|n| format!("{column} = ${n}"), brand.as_str().to_string());
        builder
    }

    /// Add a condition; `render` receives the placeholder number
    fn bind(&mut self, render: impl FnOnce(usize) -> String, value: impl ToSql + Sync + Send + 'static) {
        self.params.push(Box::new(value));
        self.conditions.push(render(self.params.len()));
    }

    fn any_of(&mut self, column: &str, values: &BTreeSet<String>) {
        if !values.is_empty() {
            let values: Vec<String> = values.iter().cloned().collect();
            self.bind(|n| format!("{column} = ANY(${n})"), values);
        }
    }

    fn points(&mut self, column: &str, range: &PointsRange) {
        if let Some(min) = range.min {
            self.bind(|n| format!("{column} >= ${n}"), min);
        }
        if let Some(max) = range.max {
            self.bind(|n| format!("{column} <= ${n}"), max);
        }
    }

    fn dates(&mut self, column: &str, range: &DateRange) {
        if let Some(from) = range.from {
            self.bind(|n| format!("{column} >= ${n}"), from);
        }
        if let Some(to) = range.to {
            self.bind(|n| format!("{column} <= ${n}"), to);
        }
    }

    fn client_ids(&mut self, column: &str, ids: &BTreeSet<ClientId>) {
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        self.bind(|n| format!("{column} = ANY(${n})"), ids);
    }

    fn scope(&mut self, column: &str, scope: &CandidateSet) {
        if let Some(ids) = scope.ids() {
            self.client_ids(column, ids);
        }
    }

    fn clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }
}

fn column<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> StoreResult<T> {
    row.try_get(name)
        .map_err(|e| StoreError::InvalidData(format!("column '{name}': {e}")))
}

fn client_id(row: &Row, name: &str) -> StoreResult<ClientId> {
    ClientId::new(column::<String>(row, name)?).map_err(StoreError::InvalidData)
}

fn brand_id(row: &Row) -> StoreResult<BrandId> {
    BrandId::new(column::<String>(row, "brand_id")?).map_err(StoreError::InvalidData)
}

fn count(row: &Row, name: &str) -> StoreResult<u32> {
    let value: i32 = column(row, name)?;
    u32::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("column '{name}' is negative: {value}")))
}

const CLIENT_COLUMNS: &str = "c.id, c.name, c.status, c.client_type, c.market, \
     c.commercial_structure, c.zone, c.state, c.city, c.postal_code, c.address, c.phone, \
     c.email, c.registered_on, c.last_visit_on, c.key_account, c.tags";

fn client_from_row(row: &Row) -> StoreResult<ClientRecord> {
    Ok(ClientRecord {
        id: client_id(row, "id")?,
        name: column(row, "name")?,
        status: column(row, "status")?,
        client_type: column(row, "client_type")?,
        market: column(row, "market")?,
        commercial_structure: column(row, "commercial_structure")?,
        zone: column(row, "zone")?,
        state: column(row, "state")?,
        city: column(row, "city")?,
        postal_code: column(row, "postal_code")?,
        address: column(row, "address")?,
        phone: column(row, "phone")?,
        email: column(row, "email")?,
        registered_on: column(row, "registered_on")?,
        last_visit_on: column(row, "last_visit_on")?,
        key_account: column(row, "key_account")?,
        tags: column(row, "tags")?,
    })
}

#[async_trait]
impl DataStore for PostgreSQLStore {
    fn backend_name(&self) -> &str {
        "postgresql"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        self.client.test_connection().await
    }

    async fn fetch_member_profiles(
        &self,
        brand: &BrandId,
        query: &MembershipQuery,
    ) -> StoreResult<Vec<MemberProfile>> {
        let mut filter = WhereBuilder::brand("m.brand_id", brand);
        filter.any_of("m.status", &query.statuses);
        filter.any_of("m.tier", &query.tiers);
        filter.points("m.points_balance", &query.points_balance);
        filter.points("m.lifetime_points", &query.lifetime_points);
        filter.dates("m.last_purchase_on", &query.last_purchase);

        let rows = self
            .select(
                "SELECT m.client_id, c.status, c.client_type, c.market, c.commercial_structure, \
                 c.zone, c.state, c.city, c.postal_code, c.registered_on, c.last_visit_on \
                 FROM brand_memberships m JOIN clients c ON c.id = m.client_id",
                filter,
                "m.client_id",
            )
            .await?;

        tracing::debug!(
            brand = %brand,
            rows = rows.len(),
            "Fetched member profiles from PostgreSQL"
        );

        rows.iter()
            .map(|row| {
                Ok(MemberProfile {
                    client_id: client_id(row, "client_id")?,
                    attributes: ClientAttributes {
                        status: column(row, "status")?,
                        client_type: column(row, "client_type")?,
                        market: column(row, "market")?,
                        commercial_structure: column(row, "commercial_structure")?,
                        zone: column(row, "zone")?,
                        state: column(row, "state")?,
                        city: column(row, "city")?,
                        postal_code: column(row, "postal_code")?,
                        registered_on: column(row, "registered_on")?,
                        last_visit_on: column(row, "last_visit_on")?,
                    },
                })
            })
            .collect()
    }

    async fn fetch_assigned_clients(
        &self,
        brand: &BrandId,
        candidates: &BTreeSet<ClientId>,
        query: &AssignmentQuery,
    ) -> StoreResult<BTreeSet<ClientId>> {
        if candidates.is_empty() {
            return Ok(BTreeSet::new());
        }

        let mut filter = WhereBuilder::brand("a.brand_id", brand);
        filter.client_ids("a.client_id", candidates);
        filter.any_of("a.agent_id", &query.agent_ids);
        filter.any_of("a.assignment_type", &query.assignment_types);
        filter.conditions.push("a.active".to_string());
        filter.conditions.push("NOT a.deleted".to_string());

        let rows = self
            .select(
                "SELECT DISTINCT a.client_id FROM client_assignments a",
                filter,
                "a.client_id",
            )
            .await?;

        rows.iter().map(|row| client_id(row, "client_id")).collect()
    }

    async fn clients(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<ClientRecord>> {
        let mut filter = WhereBuilder::brand("m.brand_id", brand);
        filter.scope("c.id", scope);

        let base = format!(
            "SELECT DISTINCT {CLIENT_COLUMNS} FROM clients c \
             JOIN brand_memberships m ON m.client_id = c.id"
        );
        let rows = self.select(&base, filter, "c.id").await?;
        rows.iter().map(client_from_row).collect()
    }

    async fn visits(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
        period: Option<&DateRange>,
    ) -> StoreResult<Vec<VisitRecord>> {
        let mut filter = WhereBuilder::brand("brand_id", brand);
        filter.scope("client_id", scope);
        if let Some(period) = period {
            filter.dates("visited_on", period);
        }

        let rows = self
            .select(
                "SELECT id, brand_id, client_id, agent_id, visited_on, visit_type, outcome, \
                 order_amount, products_discussed, follow_up, notes FROM visits",
                filter,
                "visited_on, id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(VisitRecord {
                    id: column(row, "id")?,
                    brand_id: brand_id(row)?,
                    client_id: client_id(row, "client_id")?,
                    agent_id: column(row, "agent_id")?,
                    visited_on: column(row, "visited_on")?,
                    visit_type: column(row, "visit_type")?,
                    outcome: column(row, "outcome")?,
                    order_amount: column(row, "order_amount")?,
                    products_discussed: column(row, "products_discussed")?,
                    follow_up: column(row, "follow_up")?,
                    notes: column(row, "notes")?,
                })
            })
            .collect()
    }

    async fn memberships(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<MembershipRecord>> {
        let mut filter = WhereBuilder::brand("brand_id", brand);
        filter.scope("client_id", scope);

        let rows = self
            .select(
                "SELECT brand_id, client_id, status, tier, points_balance, lifetime_points, \
                 joined_on, last_purchase_on, total_spent FROM brand_memberships",
                filter,
                "client_id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(MembershipRecord {
                    brand_id: brand_id(row)?,
                    client_id: client_id(row, "client_id")?,
                    status: column(row, "status")?,
                    tier: column(row, "tier")?,
                    points_balance: column(row, "points_balance")?,
                    lifetime_points: column(row, "lifetime_points")?,
                    joined_on: column(row, "joined_on")?,
                    last_purchase_on: column(row, "last_purchase_on")?,
                    total_spent: column(row, "total_spent")?,
                })
            })
            .collect()
    }

    async fn competitors(
        &self,
        brand: &BrandId,
        scope: &CandidateSet,
    ) -> StoreResult<Vec<CompetitorRecord>> {
        let mut filter = WhereBuilder::brand("brand_id", brand);
        filter.scope("client_id", scope);

        let rows = self
            .select(
                "SELECT id, brand_id, client_id, competitor, product, observed_price, \
                 observed_on, exclusive_display, notes FROM competitor_sightings",
                filter,
                "client_id, id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(CompetitorRecord {
                    id: column(row, "id")?,
                    brand_id: brand_id(row)?,
                    client_id: client_id(row, "client_id")?,
                    competitor: column(row, "competitor")?,
                    product: column(row, "product")?,
                    observed_price: column(row, "observed_price")?,
                    observed_on: column(row, "observed_on")?,
                    exclusive_display: column(row, "exclusive_display")?,
                    notes: column(row, "notes")?,
                })
            })
            .collect()
    }

    async fn promotions(&self, brand: &BrandId) -> StoreResult<Vec<PromotionRecord>> {
        let rows = self
            .select(
                "SELECT id, brand_id, name, description, starts_on, ends_on, discount_amount, \
                 min_purchase, active, target_tiers FROM promotions",
                WhereBuilder::brand("brand_id", brand),
                "starts_on NULLS LAST, id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(PromotionRecord {
                    id: column(row, "id")?,
                    brand_id: brand_id(row)?,
                    name: column(row, "name")?,
                    description: column(row, "description")?,
                    starts_on: column(row, "starts_on")?,
                    ends_on: column(row, "ends_on")?,
                    discount_amount: column(row, "discount_amount")?,
                    min_purchase: column(row, "min_purchase")?,
                    active: column(row, "active")?,
                    target_tiers: column(row, "target_tiers")?,
                })
            })
            .collect()
    }

    async fn surveys(&self, brand: &BrandId) -> StoreResult<Vec<SurveyRecord>> {
        let rows = self
            .select(
                "SELECT id, brand_id, title, created_on, closes_on, question_count, \
                 response_count, active, target_tiers FROM surveys",
                WhereBuilder::brand("brand_id", brand),
                "created_on NULLS LAST, id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(SurveyRecord {
                    id: column(row, "id")?,
                    brand_id: brand_id(row)?,
                    title: column(row, "title")?,
                    created_on: column(row, "created_on")?,
                    closes_on: column(row, "closes_on")?,
                    question_count: count(row, "question_count")?,
                    response_count: count(row, "response_count")?,
                    active: column(row, "active")?,
                    target_tiers: column(row, "target_tiers")?,
                })
            })
            .collect()
    }

    async fn products(&self, brand: &BrandId) -> StoreResult<Vec<ProductRecord>> {
        let rows = self
            .select(
                "SELECT sku, brand_id, name, category, unit_price, active, presentations \
                 FROM products",
                WhereBuilder::brand("brand_id", brand),
                "sku",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(ProductRecord {
                    sku: column(row, "sku")?,
                    brand_id: brand_id(row)?,
                    name: column(row, "name")?,
                    category: column(row, "category")?,
                    unit_price: column(row, "unit_price")?,
                    active: column(row, "active")?,
                    presentations: column(row, "presentations")?,
                })
            })
            .collect()
    }

    async fn team(&self, brand: &BrandId) -> StoreResult<Vec<TeamMemberRecord>> {
        let rows = self
            .select(
                "SELECT id, brand_id, name, role, email, phone, zone, active, hired_on, \
                 assigned_markets FROM team_members",
                WhereBuilder::brand("brand_id", brand),
                "name, id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(TeamMemberRecord {
                    id: column(row, "id")?,
                    brand_id: brand_id(row)?,
                    name: column(row, "name")?,
                    role: column(row, "role")?,
                    email: column(row, "email")?,
                    phone: column(row, "phone")?,
                    zone: column(row, "zone")?,
                    active: column(row, "active")?,
                    hired_on: column(row, "hired_on")?,
                    assigned_markets: column(row, "assigned_markets")?,
                })
            })
            .collect()
    }

    async fn pos_materials(&self, brand: &BrandId) -> StoreResult<Vec<PosMaterialRecord>> {
        let rows = self
            .select(
                "SELECT id, brand_id, name, material_type, stock, unit_cost, active, \
                 available_zones FROM pos_materials",
                WhereBuilder::brand("brand_id", brand),
                "name, id",
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(PosMaterialRecord {
                    id: column(row, "id")?,
                    brand_id: brand_id(row)?,
                    name: column(row, "name")?,
                    material_type: column(row, "material_type")?,
                    stock: column(row, "stock")?,
                    unit_cost: column(row, "unit_cost")?,
                    active: column(row, "active")?,
                    available_zones: column(row, "available_zones")?,
                })
            })
            .collect()
    }
}

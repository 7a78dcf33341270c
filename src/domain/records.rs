//! Source records read from the data store
//!
//! One struct per data domain. Field names double as the JSON fixture format
//! understood by the in-memory store.

use super::ids::{BrandId, ClientId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A client (point of sale, shop, distributor) as stored by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    /// Lifecycle status, e.g. `active`, `inactive`, `prospect`
    pub status: String,
    pub client_type: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub commercial_structure: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub registered_on: Option<NaiveDate>,
    #[serde(default)]
    pub last_visit_on: Option<NaiveDate>,
    #[serde(default)]
    pub key_account: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ClientRecord {
    /// Project the attributes client-level predicates are evaluated on
    pub fn attributes(&self) -> ClientAttributes {
        ClientAttributes {
            status: self.status.clone(),
            client_type: self.client_type.clone(),
            market: self.market.clone(),
            commercial_structure: self.commercial_structure.clone(),
            zone: self.zone.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            postal_code: self.postal_code.clone(),
            registered_on: self.registered_on,
            last_visit_on: self.last_visit_on,
        }
    }
}

/// Client attributes joined onto a brand membership during resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientAttributes {
    pub status: String,
    pub client_type: Option<String>,
    pub market: Option<String>,
    pub commercial_structure: Option<String>,
    pub zone: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub registered_on: Option<NaiveDate>,
    pub last_visit_on: Option<NaiveDate>,
}

/// One row of the membership ⋈ client join used by the resolver
#[derive(Debug, Clone, PartialEq)]
pub struct MemberProfile {
    pub client_id: ClientId,
    pub attributes: ClientAttributes,
}

/// A client's loyalty membership with one brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub brand_id: BrandId,
    pub client_id: ClientId,
    pub status: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub points_balance: i64,
    #[serde(default)]
    pub lifetime_points: i64,
    #[serde(default)]
    pub joined_on: Option<NaiveDate>,
    #[serde(default)]
    pub last_purchase_on: Option<NaiveDate>,
    #[serde(default)]
    pub total_spent: Option<Decimal>,
}

/// Field agent ↔ client assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub brand_id: BrandId,
    pub client_id: ClientId,
    pub agent_id: String,
    pub assignment_type: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// A field visit to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: String,
    pub brand_id: BrandId,
    pub client_id: ClientId,
    pub agent_id: String,
    pub visited_on: NaiveDate,
    pub visit_type: String,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub order_amount: Option<Decimal>,
    #[serde(default)]
    pub products_discussed: Vec<String>,
    #[serde(default)]
    pub follow_up: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub id: String,
    pub brand_id: BrandId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    pub min_purchase: Option<Decimal>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub target_tiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: String,
    pub brand_id: BrandId,
    pub title: String,
    #[serde(default)]
    pub created_on: Option<NaiveDate>,
    #[serde(default)]
    pub closes_on: Option<NaiveDate>,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub response_count: u32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub target_tiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    pub brand_id: BrandId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub presentations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberRecord {
    pub id: String,
    pub brand_id: BrandId,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub hired_on: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_markets: Vec<String>,
}

/// A competitor product sighted at a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub id: String,
    pub brand_id: BrandId,
    pub client_id: ClientId,
    pub competitor: String,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub observed_price: Option<Decimal>,
    #[serde(default)]
    pub observed_on: Option<NaiveDate>,
    #[serde(default)]
    pub exclusive_display: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Point-of-sale material (displays, banners, fridges)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosMaterialRecord {
    pub id: String,
    pub brand_id: BrandId,
    pub name: String,
    pub material_type: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub available_zones: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_record_minimal_json() {
        let client: ClientRecord = serde_json::from_str(
            r#"{"id": "c-1", "name": "Tienda Uno", "status": "active", "client_type": null}"#,
        )
        .unwrap();
        assert_eq!(client.id.as_str(), "c-1");
        assert!(client.tags.is_empty());
        assert!(!client.key_account);
        assert!(client.registered_on.is_none());
    }

    #[test]
    fn test_attributes_projection() {
        let client: ClientRecord = serde_json::from_str(
            r#"{"id": "c-1", "name": "X", "status": "active", "client_type": "retail",
                "zone": "north", "registered_on": "2024-03-01"}"#,
        )
        .unwrap();
        let attrs = client.attributes();
        assert_eq!(attrs.status, "active");
        assert_eq!(attrs.client_type.as_deref(), Some("retail"));
        assert_eq!(attrs.zone.as_deref(), Some("north"));
        assert_eq!(
            attrs.registered_on,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_assignment_defaults_to_active() {
        let a: AssignmentRecord = serde_json::from_str(
            r#"{"brand_id": "b", "client_id": "c-1", "agent_id": "ag-1", "assignment_type": "primary"}"#,
        )
        .unwrap();
        assert!(a.active);
        assert!(!a.deleted);
    }

    #[test]
    fn test_money_from_string() {
        let p: ProductRecord = serde_json::from_str(
            r#"{"sku": "S1", "brand_id": "b", "name": "Cola", "unit_price": "12.50"}"#,
        )
        .unwrap();
        assert_eq!(p.unit_price, Some(Decimal::new(1250, 2)));
    }
}

//! Segmentation filters
//!
//! [`FilterSpec`] is the fixed, enumerable set of segmentation dimensions an
//! export can be narrowed by. Every field is optional: an empty set or an
//! unbounded range means "not filtered on this dimension".
//!
//! The module also derives the two store-facing queries from a filter:
//! [`MembershipQuery`] (predicates the store evaluates while fetching
//! memberships) and [`AssignmentQuery`] (the agent/assignment lookup).

use super::errors::CadreError;
use super::records::{AssignmentRecord, MembershipRecord};
use super::result::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True when neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive containment check
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Containment for nullable columns: a missing date never matches a
    /// bounded range
    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        date.is_some_and(|d| self.contains(d))
    }

    fn validate(&self, name: &str) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(CadreError::Validation(format!(
                    "{name}: 'from' ({from}) is after 'to' ({to})"
                )));
            }
        }
        Ok(())
    }
}

/// Inclusive integer range for point counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointsRange {
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

impl PointsRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(CadreError::Validation(format!(
                    "{name}: 'min' ({min}) is greater than 'max' ({max})"
                )));
            }
        }
        Ok(())
    }
}

/// Every segmentation dimension an export may be filtered by
///
/// # Examples
///
/// ```
/// use cadre::domain::filter::FilterSpec;
///
/// let filter: FilterSpec = serde_json::from_str(
///     r#"{"client_status": ["active"], "points_balance": {"min": 100}}"#,
/// ).unwrap();
/// assert!(filter.has_population_filters());
/// assert!(FilterSpec::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSpec {
    pub client_status: BTreeSet<String>,
    pub client_type: BTreeSet<String>,
    pub market: BTreeSet<String>,
    pub commercial_structure: BTreeSet<String>,
    pub zone: BTreeSet<String>,
    pub state: BTreeSet<String>,
    pub city: BTreeSet<String>,
    pub postal_code: BTreeSet<String>,
    pub membership_status: BTreeSet<String>,
    pub tier: BTreeSet<String>,
    pub points_balance: PointsRange,
    pub lifetime_points: PointsRange,
    pub registered: DateRange,
    pub last_visit: DateRange,
    pub last_purchase: DateRange,
    /// Reporting period for time-bounded datasets; does not narrow the
    /// population
    pub period: DateRange,
    pub agent_ids: BTreeSet<String>,
    pub assignment_types: BTreeSet<String>,
}

impl FilterSpec {
    /// True when no field at all is set
    pub fn is_empty(&self) -> bool {
        !self.has_population_filters() && self.period.is_unbounded()
    }

    /// True when any dimension that narrows the client population is set
    pub fn has_population_filters(&self) -> bool {
        self.has_client_filters()
            || !self.membership_query().is_unrestricted()
            || self.has_assignment_filter()
    }

    /// True when any in-memory client-attribute predicate is set
    pub fn has_client_filters(&self) -> bool {
        !self.client_status.is_empty()
            || !self.client_type.is_empty()
            || !self.market.is_empty()
            || !self.commercial_structure.is_empty()
            || !self.zone.is_empty()
            || !self.state.is_empty()
            || !self.city.is_empty()
            || !self.postal_code.is_empty()
            || !self.registered.is_unbounded()
            || !self.last_visit.is_unbounded()
    }

    pub fn has_assignment_filter(&self) -> bool {
        !self.agent_ids.is_empty() || !self.assignment_types.is_empty()
    }

    /// Reporting period, if one was given
    pub fn period(&self) -> Option<&DateRange> {
        (!self.period.is_unbounded()).then_some(&self.period)
    }

    /// Reject inverted ranges
    pub fn validate(&self) -> Result<()> {
        self.points_balance.validate("points_balance")?;
        self.lifetime_points.validate("lifetime_points")?;
        self.registered.validate("registered")?;
        self.last_visit.validate("last_visit")?;
        self.last_purchase.validate("last_purchase")?;
        self.period.validate("period")?;
        Ok(())
    }

    /// The predicates pushed down to the membership fetch
    pub fn membership_query(&self) -> MembershipQuery {
        MembershipQuery {
            statuses: self.membership_status.clone(),
            tiers: self.tier.clone(),
            points_balance: self.points_balance,
            lifetime_points: self.lifetime_points,
            last_purchase: self.last_purchase,
        }
    }

    /// The assignment lookup, if the filter carries one
    pub fn assignment_query(&self) -> Option<AssignmentQuery> {
        self.has_assignment_filter().then(|| AssignmentQuery {
            agent_ids: self.agent_ids.clone(),
            assignment_types: self.assignment_types.clone(),
        })
    }
}

/// Membership predicates evaluated by the store at fetch time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipQuery {
    pub statuses: BTreeSet<String>,
    pub tiers: BTreeSet<String>,
    pub points_balance: PointsRange,
    pub lifetime_points: PointsRange,
    pub last_purchase: DateRange,
}

impl MembershipQuery {
    pub fn is_unrestricted(&self) -> bool {
        self.statuses.is_empty()
            && self.tiers.is_empty()
            && self.points_balance.is_unbounded()
            && self.lifetime_points.is_unbounded()
            && self.last_purchase.is_unbounded()
    }

    /// Reference evaluation, used by stores without a query engine
    pub fn matches(&self, membership: &MembershipRecord) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&membership.status))
            && (self.tiers.is_empty()
                || membership
                    .tier
                    .as_ref()
                    .is_some_and(|t| self.tiers.contains(t)))
            && self.points_balance.contains(membership.points_balance)
            && self.lifetime_points.contains(membership.lifetime_points)
            && self.last_purchase.contains_opt(membership.last_purchase_on)
    }
}

/// Agent / assignment-type lookup over active, non-deleted assignments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentQuery {
    pub agent_ids: BTreeSet<String>,
    pub assignment_types: BTreeSet<String>,
}

impl AssignmentQuery {
    pub fn matches(&self, assignment: &AssignmentRecord) -> bool {
        assignment.active
            && !assignment.deleted
            && (self.agent_ids.is_empty() || self.agent_ids.contains(&assignment.agent_id))
            && (self.assignment_types.is_empty()
                || self.assignment_types.contains(&assignment.assignment_type))
    }
}

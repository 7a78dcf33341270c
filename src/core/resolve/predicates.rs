//! Client-level predicates
//!
//! Each predicate is a pure function over the attributes joined onto a
//! membership. A filter turns into a list of predicates combined by
//! conjunction, so the order they are applied in does not matter.

use crate::domain::records::ClientAttributes;
use crate::domain::{DateRange, FilterSpec};
use std::collections::BTreeSet;

/// One client-attribute condition derived from a [`FilterSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientPredicate {
    Status(BTreeSet<String>),
    ClientType(BTreeSet<String>),
    Market(BTreeSet<String>),
    CommercialStructure(BTreeSet<String>),
    Zone(BTreeSet<String>),
    State(BTreeSet<String>),
    City(BTreeSet<String>),
    PostalCode(BTreeSet<String>),
    Registered(DateRange),
    LastVisit(DateRange),
}

impl ClientPredicate {
    /// Predicates for every client dimension set in `filter`
    pub fn from_filter(filter: &FilterSpec) -> Vec<ClientPredicate> {
        let sets = [
            (&filter.client_status, ClientPredicate::Status as fn(_) -> _),
            (&filter.client_type, ClientPredicate::ClientType),
            (&filter.market, ClientPredicate::Market),
            (&filter.commercial_structure, ClientPredicate::CommercialStructure),
            (&filter.zone, ClientPredicate::Zone),
            (&filter.state, ClientPredicate::State),
            (&filter.city, ClientPredicate::City),
            (&filter.postal_code, ClientPredicate::PostalCode),
        ];

        let mut predicates: Vec<ClientPredicate> = sets
            .into_iter()
            .filter(|(values, _)| !values.is_empty())
            .map(|(values, predicate)| predicate(values.clone()))
            .collect();

        if !filter.registered.is_unbounded() {
            predicates.push(ClientPredicate::Registered(filter.registered));
        }
        if !filter.last_visit.is_unbounded() {
            predicates.push(ClientPredicate::LastVisit(filter.last_visit));
        }

        predicates
    }

    pub fn matches(&self, attributes: &ClientAttributes) -> bool {
        match self {
            ClientPredicate::Status(values) => values.contains(&attributes.status),
            ClientPredicate::ClientType(values) => in_set(values, &attributes.client_type),
            ClientPredicate::Market(values) => in_set(values, &attributes.market),
            ClientPredicate::CommercialStructure(values) => {
                in_set(values, &attributes.commercial_structure)
            }
            ClientPredicate::Zone(values) => in_set(values, &attributes.zone),
            ClientPredicate::State(values) => in_set(values, &attributes.state),
            ClientPredicate::City(values) => in_set(values, &attributes.city),
            ClientPredicate::PostalCode(values) => in_set(values, &attributes.postal_code),
            ClientPredicate::Registered(range) => range.contains_opt(attributes.registered_on),
            ClientPredicate::LastVisit(range) => range.contains_opt(attributes.last_visit_on),
        }
    }
}

/// A missing attribute never belongs to a set
fn in_set(values: &BTreeSet<String>, attribute: &Option<String>) -> bool {
    attribute.as_ref().is_some_and(|value| values.contains(value))
}

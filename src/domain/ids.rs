//! Domain identifier types with validation
//!
//! Newtype wrappers keep brand and client identifiers from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brand (tenant) identifier
///
/// Every query the engine runs is restricted to one brand. The scope arrives
/// already authorized; this type only guarantees it is non-empty.
///
/// # Examples
///
/// ```
/// use cadre::domain::ids::BrandId;
/// use std::str::FromStr;
///
/// let brand = BrandId::from_str("acme-beverages").unwrap();
/// assert_eq!(brand.as_str(), "acme-beverages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrandId(String);

impl BrandId {
    /// Creates a new BrandId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Brand ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the brand ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BrandId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BrandId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Client identifier
///
/// Ordered so candidate sets iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new ClientId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Client ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the client ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_id_valid() {
        let brand = BrandId::new("acme").unwrap();
        assert_eq!(brand.as_str(), "acme");
        assert_eq!(brand.to_string(), "acme");
    }

    #[test]
    fn test_brand_id_blank() {
        assert!(BrandId::new("").is_err());
        assert!(BrandId::new("   ").is_err());
    }

    #[test]
    fn test_client_id_ordering() {
        let a = ClientId::new("c-001").unwrap();
        let b = ClientId::new("c-002").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_client_id_serializes_as_plain_string() {
        let id = ClientId::new("c-9").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c-9\"");
        let back: ClientId = serde_json::from_str("\"c-9\"").unwrap();
        assert_eq!(back, id);
    }
}

//! Dataset kinds, tabular blobs and export results

use super::errors::CadreError;
use super::result::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The nine exportable dataset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Clients,
    Visits,
    Memberships,
    Promotions,
    Surveys,
    Products,
    Team,
    Competitors,
    PosMaterials,
}

/// Whether a dataset honors the candidate population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoping {
    /// Restricted to the resolved client population
    Population,
    /// Always brand-wide; the candidate set is ignored
    BrandWide,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 9] = [
        DatasetKind::Clients,
        DatasetKind::Visits,
        DatasetKind::Memberships,
        DatasetKind::Promotions,
        DatasetKind::Surveys,
        DatasetKind::Products,
        DatasetKind::Team,
        DatasetKind::Competitors,
        DatasetKind::PosMaterials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Clients => "clients",
            DatasetKind::Visits => "visits",
            DatasetKind::Memberships => "memberships",
            DatasetKind::Promotions => "promotions",
            DatasetKind::Surveys => "surveys",
            DatasetKind::Products => "products",
            DatasetKind::Team => "team",
            DatasetKind::Competitors => "competitors",
            DatasetKind::PosMaterials => "pos_materials",
        }
    }

    pub fn scoping(&self) -> Scoping {
        match self {
            DatasetKind::Clients
            | DatasetKind::Visits
            | DatasetKind::Memberships
            | DatasetKind::Competitors => Scoping::Population,
            DatasetKind::Promotions
            | DatasetKind::Surveys
            | DatasetKind::Products
            | DatasetKind::Team
            | DatasetKind::PosMaterials => Scoping::BrandWide,
        }
    }

    /// Archive member name
    pub fn member_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = CadreError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                CadreError::Validation(format!(
                    "Unknown dataset kind '{s}'. Must be one of: {}",
                    DatasetKind::ALL.map(|k| k.as_str()).join(", ")
                ))
            })
    }
}

/// Header plus body rows of one dataset, before text encoding
///
/// Every row has exactly as many cells as the header; construction fails
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularBlob {
    kind: DatasetKind,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularBlob {
    pub fn new(kind: DatasetKind, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if header.is_empty() {
            return Err(CadreError::Generation {
                kind,
                message: "header cannot be empty".to_string(),
            });
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(CadreError::Generation {
                kind,
                message: format!(
                    "row {index} has {} cells, header has {}",
                    row.len(),
                    header.len()
                ),
            });
        }
        Ok(Self { kind, header, rows })
    }

    /// A blob with a header and no body
    pub fn header_only(kind: DatasetKind, header: Vec<String>) -> Result<Self> {
        Self::new(kind, header, Vec::new())
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A blob rendered to text, ready for delivery or archiving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    pub kind: DatasetKind,
    pub text: String,
}

/// Outcome of one export call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    /// Exactly one dataset, delivered as CSV text
    Single { kind: DatasetKind, csv: String },
    /// Several datasets packed into one ZIP archive
    Archive {
        kinds: Vec<DatasetKind>,
        bytes: Vec<u8>,
    },
}

impl ExportResult {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportResult::Single { .. } => "text/csv; charset=utf-8",
            ExportResult::Archive { .. } => "application/zip",
        }
    }

    /// Attachment name: `<kind>_<YYYYMMDD>.csv` or `export_<YYYYMMDD>.zip`
    pub fn file_name(&self, date: NaiveDate) -> String {
        let stamp = date.format("%Y%m%d");
        match self {
            ExportResult::Single { kind, .. } => format!("{kind}_{stamp}.csv"),
            ExportResult::Archive { .. } => format!("export_{stamp}.zip"),
        }
    }

    /// Datasets contained in the result, in request order
    pub fn kinds(&self) -> Vec<DatasetKind> {
        match self {
            ExportResult::Single { kind, .. } => vec![*kind],
            ExportResult::Archive { kinds, .. } => kinds.clone(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ExportResult::Single { csv, .. } => csv.into_bytes(),
            ExportResult::Archive { bytes, .. } => bytes,
        }
    }
}

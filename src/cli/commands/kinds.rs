//! Kinds command implementation

use crate::domain::{DatasetKind, Scoping};
use clap::Args;

/// Arguments for the kinds command
#[derive(Args, Debug)]
pub struct KindsArgs {}

impl KindsArgs {
    /// Execute the kinds command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("{:<16} SCOPE", "KIND");
        for kind in DatasetKind::ALL {
            println!("{:<16} {}", kind.as_str(), scope_label(kind.scoping()));
        }
        Ok(0)
    }
}

fn scope_label(scoping: Scoping) -> &'static str {
    match scoping {
        Scoping::Population => "filtered population",
        Scoping::BrandWide => "brand-wide",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_labels() {
        assert_eq!(scope_label(DatasetKind::Visits.scoping()), "filtered population");
        assert_eq!(scope_label(DatasetKind::Surveys.scoping()), "brand-wide");
    }
}

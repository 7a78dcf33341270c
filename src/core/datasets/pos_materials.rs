//! Point-of-sale material roster (brand-wide)

use super::format::{list, money, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::PosMaterialRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Material ID",
    "Name",
    "Type",
    "Stock",
    "Unit Cost",
    "Active",
    "Available Zones",
];

pub struct PosMaterialsGenerator;

fn row(material: &PosMaterialRecord) -> Vec<String> {
    vec![
        material.id.clone(),
        material.name.clone(),
        material.material_type.clone(),
        material.stock.to_string(),
        money(material.unit_cost),
        yes_no(material.active),
        list(&material.available_zones),
    ]
}

#[async_trait]
impl DatasetGenerator for PosMaterialsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::PosMaterials
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let materials = store.pos_materials(ctx.brand).await?;
        Ok(materials.iter().map(row).collect())
    }
}

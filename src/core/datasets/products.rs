//! Product catalog (brand-wide)

use super::format::{list, money, text, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::ProductRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &["SKU", "Name", "Category", "Unit Price", "Active", "Presentations"];

pub struct ProductsGenerator;

fn row(product: &ProductRecord) -> Vec<String> {
    vec![
        product.sku.clone(),
        product.name.clone(),
        text(product.category.as_ref()),
        money(product.unit_price),
        yes_no(product.active),
        list(&product.presentations),
    ]
}

#[async_trait]
impl DatasetGenerator for ProductsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Products
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let products = store.products(ctx.brand).await?;
        Ok(products.iter().map(row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_formats_price_and_lists() {
        let product: ProductRecord = serde_json::from_str(
            r#"{"sku": "COLA-600", "brand_id": "acme", "name": "Cola 600ml",
                "unit_price": "18.005", "active": true, "presentations": ["600ml", "6-pack"]}"#,
        )
        .unwrap();
        assert_eq!(
            row(&product),
            vec!["COLA-600", "Cola 600ml", "", "18.01", "Yes", "600ml, 6-pack"]
        );
    }
}

//! Client roster

use super::format::{list, opt_date, text, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::ClientRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Client ID",
    "Name",
    "Status",
    "Type",
    "Market",
    "Commercial Structure",
    "Zone",
    "State",
    "City",
    "Postal Code",
    "Address",
    "Phone",
    "Email",
    "Registered On",
    "Last Visit",
    "Key Account",
    "Tags",
];

pub struct ClientsGenerator;

fn row(client: &ClientRecord) -> Vec<String> {
    vec![
        client.id.to_string(),
        client.name.clone(),
        client.status.clone(),
        text(client.client_type.as_ref()),
        text(client.market.as_ref()),
        text(client.commercial_structure.as_ref()),
        text(client.zone.as_ref()),
        text(client.state.as_ref()),
        text(client.city.as_ref()),
        text(client.postal_code.as_ref()),
        text(client.address.as_ref()),
        text(client.phone.as_ref()),
        text(client.email.as_ref()),
        opt_date(client.registered_on),
        opt_date(client.last_visit_on),
        yes_no(client.key_account),
        list(&client.tags),
    ]
}

#[async_trait]
impl DatasetGenerator for ClientsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Clients
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let clients = store.clients(ctx.brand, ctx.candidates).await?;
        Ok(clients.iter().map(row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_matches_header() {
        let client: ClientRecord = serde_json::from_str(
            r#"{"id": "c-1", "name": "Tienda, Uno", "status": "active", "client_type": "retail",
                "registered_on": "2023-11-05", "key_account": true, "tags": ["vip", "corner"]}"#,
        )
        .unwrap();
        let cells = row(&client);
        assert_eq!(cells.len(), HEADER.len());
        assert_eq!(cells[1], "Tienda, Uno");
        assert_eq!(cells[4], "");
        assert_eq!(cells[13], "2023-11-05");
        assert_eq!(cells[15], "Yes");
        assert_eq!(cells[16], "vip, corner");
    }
}

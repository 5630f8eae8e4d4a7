use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::config::LedgerConfig;
use crate::error::{ChainSealError, Result};
use crate::types::AnchorReference;

use super::{LedgerQueryService, MetadataEntry};

/// Blockfrost-compatible metadata query client.
///
/// `GET {base}/txs/{reference}/metadata` with the project id passed as a
/// header. A 404 means the reference is unknown to the ledger and maps to
/// `InvalidReference`; everything else that goes wrong is a service fault.
pub struct BlockfrostClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
}

impl BlockfrostClient {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ChainSealError::ledger_service(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
        })
    }

    fn metadata_url(&self, reference: &AnchorReference) -> String {
        format!("{}/txs/{}/metadata", self.base_url, reference)
    }
}

#[async_trait]
impl LedgerQueryService for BlockfrostClient {
    async fn transaction_metadata(
        &self,
        reference: &AnchorReference,
    ) -> Result<Vec<MetadataEntry>> {
        let url = self.metadata_url(reference);
        debug!("Querying ledger metadata: {}", url);

        let response = self
            .http
            .get(&url)
            .header("project_id", &self.project_id)
            .send()
            .await
            .map_err(|e| ChainSealError::ledger_service(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ChainSealError::invalid_reference(
                reference.as_str(),
                "no transaction metadata found on the ledger",
            )),
            status if !status.is_success() => Err(ChainSealError::ledger_service(format!(
                "query service returned {}",
                status
            ))),
            _ => response
                .json::<Vec<MetadataEntry>>()
                .await
                .map_err(|e| ChainSealError::ledger_service(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> LedgerConfig {
        LedgerConfig {
            endpoint: endpoint.to_string(),
            project_id: "preprodTESTKEY".to_string(),
            request_timeout_ms: 5000,
        }
    }

    #[tokio::test]
    async fn test_metadata_entries_are_parsed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/txs/abc123/metadata")
            .match_header("project_id", "preprodTESTKEY")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"label":"721","json_metadata":{"certificate":{"hash":"cafe"}}}]"#,
            )
            .create_async()
            .await;

        let client = BlockfrostClient::new(&config(&server.url())).unwrap();
        let entries = client
            .transaction_metadata(&AnchorReference::new("abc123"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "721");
        assert_eq!(entries[0].json_metadata["certificate"]["hash"], "cafe");
    }

    #[tokio::test]
    async fn test_not_found_is_invalid_reference() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/txs/missing/metadata")
            .with_status(404)
            .create_async()
            .await;

        let client = BlockfrostClient::new(&config(&server.url())).unwrap();
        let result = client
            .transaction_metadata(&AnchorReference::new("missing"))
            .await;

        assert!(matches!(
            result,
            Err(ChainSealError::InvalidReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_server_fault_is_a_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/txs/abc123/metadata")
            .with_status(500)
            .create_async()
            .await;

        let client = BlockfrostClient::new(&config(&server.url())).unwrap();
        let result = client
            .transaction_metadata(&AnchorReference::new("abc123"))
            .await;

        assert!(matches!(result, Err(ChainSealError::LedgerService(_))));
    }
}

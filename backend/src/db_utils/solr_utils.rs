//! Solr client for facet counts and schema field types.

use std::collections::BTreeMap;

use common::facet_counts::RawCounts;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::FacetConfig;

/// What the facet menu needs from the search backend.
#[allow(async_fn_in_trait)]
pub trait FacetBackend {
    /// Field name to backend type name.
    async fn field_types(&self) -> anyhow::Result<BTreeMap<String, String>>;

    /// Run the faceted query; `None` when the backend reported no facet counts at all.
    async fn facet_counts(&self, params: &[(String, String)]) -> anyhow::Result<Option<RawCounts>>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSelectResponse {
    #[serde(default)]
    pub facet_counts: Option<RawCounts>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSchemaFields {
    pub fields: Vec<RawSchemaField>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Clone)]
pub struct SolrClient {
    base_url: String,
    client: reqwest::Client,
}

impl SolrClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client: reqwest::Client::new() }
    }

    pub fn from_config(config: &FacetConfig) -> Self {
        Self::new(config.solr_url.clone())
    }

    async fn solr_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> anyhow::Result<T> {
        let t0 = std::time::Instant::now();
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .query(&[("wt", "json"), ("json.nl", "map")])
            .query(params)
            .send()
            .await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {}: {}", status, response_txt);
        }
        let dt_ms = t0.elapsed().as_millis();
        tracing::debug!("SOLR RESPONSE: {} len = {} ({}ms)", path, response_txt.len(), dt_ms);
        let response: T = serde_json::from_str(&response_txt)?;
        Ok(response)
    }
}

impl FacetBackend for SolrClient {
    async fn field_types(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let response: RawSchemaFields = self.solr_get("schema/fields", &[]).await?;
        Ok(response.fields.into_iter().map(|f| (f.name, f.field_type)).collect())
    }

    async fn facet_counts(&self, params: &[(String, String)]) -> anyhow::Result<Option<RawCounts>> {
        let response: RawSelectResponse = self.solr_get("select", params).await?;
        Ok(response.facet_counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_response_without_facets() {
        let body = r#"{"responseHeader": {"status": 0}, "response": {"numFound": 0, "docs": []}}"#;
        let response: RawSelectResponse = serde_json::from_str(body).unwrap();
        assert!(response.facet_counts.is_none());
    }

    #[test]
    fn schema_fields_keep_type_names() {
        let body = r#"{"fields": [
            {"name": "created", "type": "date", "indexed": true},
            {"name": "Title", "type": "text"}
        ]}"#;
        let response: RawSchemaFields = serde_json::from_str(body).unwrap();
        assert_eq!(response.fields[0].field_type, "date");
        assert_eq!(response.fields[1].name, "Title");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = SolrClient::new("http://localhost:8983/solr/plone/");
        assert_eq!(client.base_url, "http://localhost:8983/solr/plone");
    }
}

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Client for the record store's REST surface.
///
/// Reads are GETs with equality filters encoded `field=eq.<value>`; writes
/// are POSTs with a representation-returning preference. The store never
/// distinguishes "no rows" from success — an empty array is a valid read
/// result, and only non-2xx statuses are errors.
///
/// No retry and no caching here; [`StoreError::is_transient`] tells callers
/// whether retrying is worthwhile.
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    /// Build a client from explicit configuration.
    ///
    /// TLS verification stays enabled and every request carries the
    /// configured timeout.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{collection}", self.base_url)
    }

    /// Filtered read of a collection.
    ///
    /// `select` is the column projection (`"*"` for whole rows); `filters`
    /// are (field, value) pairs combined as equality predicates. Values are
    /// URL-encoded by the query serializer, so opaque ids are safe as-is.
    pub async fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        select: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let mut params: Vec<(String, String)> = Vec::with_capacity(filters.len() + 1);
        params.push(("select".to_string(), select.to_string()));
        for (field, value) in filters {
            params.push(((*field).to_string(), format!("eq.{value}")));
        }

        tracing::debug!(collection, select, filters = filters.len(), "record store query");
        let resp = self
            .client
            .get(self.url(collection))
            .query(&params)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        decode_rows(collection, resp).await
    }

    /// Insert a record, returning the created row(s).
    pub async fn insert<T: DeserializeOwned>(
        &self,
        collection: &str,
        record: &impl Serialize,
    ) -> Result<Vec<T>, StoreError> {
        tracing::debug!(collection, "record store insert");
        let resp = self
            .client
            .post(self.url(collection))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        decode_rows(collection, resp).await
    }
}

/// Decode a store response: rows on 2xx, typed error otherwise.
async fn decode_rows<T: DeserializeOwned>(
    collection: &str,
    resp: reqwest::Response,
) -> Result<Vec<T>, StoreError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(StoreError::Status {
            collection: collection.to_string(),
            status,
            body,
        });
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|source| StoreError::Decode {
        collection: collection.to_string(),
        source,
    })
}

//! REST client for the item backend.
//!
//! Implements every backend port over HTTP with a bearer token. Non-success
//! statuses map through `GatewayError::from_status`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::foundation::{ItemId, ProjectId};
use crate::domain::item::{ItemRecord, ItemType, VersionedItem};
use crate::domain::lifecycle::RulesEvaluation;
use crate::domain::revision::RevisionPayload;
use crate::ports::{
    GatewayError, ItemGateway, ItemUpdate, ReferenceDataSource, ReferenceEntry, ReferenceKind,
    RulesEvaluator,
};

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct RestBackendConfig {
    pub base_url: String,
    pub api_token: Secret<String>,
    pub timeout: Duration,
}

/// Backend client.
pub struct RestBackendClient {
    config: RestBackendConfig,
    client: Client,
}

impl RestBackendClient {
    pub fn new(config: RestBackendConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn item_path(item_type: ItemType, id: ItemId) -> String {
        format!("{}/{}/", item_type.capabilities().route_segment(), id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request
            .bearer_auth(self.config.api_token.expose_secret())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Network(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    GatewayError::Network(format!("Connection failed: {}", e))
                } else {
                    GatewayError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Backend request failed");
        Err(GatewayError::from_status(status.as_u16(), body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ItemGateway for RestBackendClient {
    async fn load_item(&self, item_type: ItemType, id: ItemId) -> Result<VersionedItem, GatewayError> {
        let url = self.url(&Self::item_path(item_type, id));
        let response = self.send(self.client.get(url)).await?;
        let record: ItemRecord = Self::decode(response).await?;
        Ok(record.into_item(item_type))
    }

    async fn update_item(
        &self,
        item_type: ItemType,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<(), GatewayError> {
        let url = self.url(&Self::item_path(item_type, id));
        let body = update.to_payload(item_type.capabilities());
        self.send(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    async fn create_revision(
        &self,
        item_type: ItemType,
        id: ItemId,
        payload: RevisionPayload,
    ) -> Result<VersionedItem, GatewayError> {
        let url = self.url(&format!("{}revisions/", Self::item_path(item_type, id)));
        let response = self.send(self.client.post(url).json(&payload)).await?;
        let record: ItemRecord = Self::decode(response).await?;
        Ok(record.into_item(item_type))
    }

    async fn archive_item(&self, item_type: ItemType, id: ItemId) -> Result<(), GatewayError> {
        let url = self.url(&format!("{}archive/", Self::item_path(item_type, id)));
        self.send(self.client.put(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl RulesEvaluator for RestBackendClient {
    async fn evaluate_rules(
        &self,
        item_type: ItemType,
        item_id: ItemId,
        project_id: Option<ProjectId>,
    ) -> Result<RulesEvaluation, GatewayError> {
        let url = self.url(&format!(
            "rules/evaluate/{}/{}/",
            item_type.capabilities().route_segment(),
            item_id
        ));
        let mut request = self.client.get(url);
        if let Some(project_id) = project_id {
            request = request.query(&[("project_id", project_id.as_i64())]);
        }
        let response = self.send(request).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl ReferenceDataSource for RestBackendClient {
    async fn fetch(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, GatewayError> {
        let url = self.url(&format!("{}/", kind.as_str()));
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }
}

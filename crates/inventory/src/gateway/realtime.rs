use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::ItemGateway;
use crate::errors::GatewayError;
use crate::item::{ItemId, ItemRecord};

/// Collection the items live under in the database tree.
const COLLECTION: &str = "items";

/// Gateway for a hosted realtime database reached through its REST surface.
///
/// - create: `POST {base}/items.json`, answered with `{"name": "<new key>"}`
/// - update: `PUT {base}/items/{id}.json`
/// - list:   `GET {base}/items.json` (`null` when the collection is empty)
/// - get:    `GET {base}/items/{id}.json`
///
/// An optional auth token is sent as the `auth` query parameter.
pub struct RealtimeDbGateway {
    client: Client,
    base_url: String,
    auth: Option<String>,
}

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl RealtimeDbGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            auth: None,
        }
    }

    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url, COLLECTION)
    }

    pub fn item_url(&self, id: &ItemId) -> String {
        format!("{}/{}/{}.json", self.base_url, COLLECTION, id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.auth {
            Some(token) => builder.query(&[("auth", token)]),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => status.to_string(),
            Err(_) => body,
        };
        warn!(status = status.as_u16(), %message, "realtime database rejected request");
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ItemGateway for RealtimeDbGateway {
    async fn create(&self, record: ItemRecord) -> Result<ItemId, GatewayError> {
        let builder = self
            .request(Method::POST, self.collection_url())
            .json(&record.without_id());
        let pushed: PushResponse = self.send(builder).await?.json().await?;
        debug!(id = %pushed.name, "realtime database: pushed item");
        Ok(ItemId::new(pushed.name))
    }

    async fn update(&self, id: &ItemId, record: ItemRecord) -> Result<(), GatewayError> {
        let record = record.with_id(id.clone());
        let builder = self.request(Method::PUT, self.item_url(id)).json(&record);
        self.send(builder).await?;
        debug!(%id, "realtime database: updated item");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ItemRecord>, GatewayError> {
        let builder = self.request(Method::GET, self.collection_url());
        let items: Option<BTreeMap<ItemId, ItemRecord>> = self.send(builder).await?.json().await?;
        Ok(items
            .unwrap_or_default()
            .into_iter()
            .map(|(id, record)| record.with_id(id))
            .collect())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<ItemRecord>, GatewayError> {
        let builder = self.request(Method::GET, self.item_url(id));
        let item: Option<ItemRecord> = self.send(builder).await?.json().await?;
        Ok(item.map(|record| record.with_id(id.clone())))
    }
}

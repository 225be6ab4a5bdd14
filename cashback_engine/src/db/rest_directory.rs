use std::sync::Arc;

use cbr_common::Secret;
use chrono::{DateTime, Utc};
use log::trace;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::Deserialize;

use crate::{
    db_types::{Business, BusinessId},
    traits::{BusinessDirectory, DirectoryError},
};

/// Client for the hosted business directory, a row store with a PostgREST-style query interface. The relay only ever
/// reads from it, so just the two filter queries are implemented.
#[derive(Clone)]
pub struct RestDirectory {
    base_url: String,
    client: Arc<Client>,
}

impl RestDirectory {
    pub fn new(base_url: &str, api_key: &Secret<String>) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::with_capacity(2);
        let mut key = HeaderValue::from_str(api_key.reveal()).map_err(|e| DirectoryError::UpstreamError(e.to_string()))?;
        key.set_sensitive(true);
        headers.insert("apikey", key.clone());
        headers.insert("Authorization", key);
        let client =
            Client::builder().default_headers(headers).build().map_err(|e| DirectoryError::UpstreamError(e.to_string()))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client: Arc::new(client) })
    }

    async fn query_businesses(&self, filter: &str) -> Result<Vec<Business>, DirectoryError> {
        let url = format!("{}/businesses?{filter}", self.base_url);
        trace!("🏢️ Directory query: {url}");
        let response = self.client.get(url).send().await.map_err(|e| DirectoryError::UpstreamError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DirectoryError::UpstreamError(format!("directory returned {}", response.status())));
        }
        let rows =
            response.json::<Vec<BusinessRow>>().await.map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        Ok(rows.into_iter().map(Business::from).collect())
    }
}

impl BusinessDirectory for RestDirectory {
    async fn fetch_active_businesses(&self) -> Result<Vec<Business>, DirectoryError> {
        self.query_businesses("active=eq.true&select=*").await
    }

    async fn fetch_business(&self, id: &BusinessId) -> Result<Option<Business>, DirectoryError> {
        let rows = self.query_businesses(&format!("id=eq.{id}&select=*")).await?;
        Ok(rows.into_iter().next())
    }
}

/// A raw directory row. The store keeps snake_case column names.
#[derive(Debug, Deserialize)]
struct BusinessRow {
    id: String,
    name: String,
    email: String,
    category: String,
    location: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<BusinessRow> for Business {
    fn from(row: BusinessRow) -> Self {
        Self {
            id: BusinessId(row.id),
            name: row.name,
            email: row.email,
            category: row.category,
            location: row.location,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

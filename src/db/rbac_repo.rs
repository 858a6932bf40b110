// src/db/rbac_repo.rs

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT_LANGUAGE, CONTENT_TYPE},
    Client,
};
use serde::Deserialize;
use serde_json::Value;

use crate::common::error::RemoteError;
use crate::db::remote_repo::{decode, ensure_success, join_url};

/// Leitura do catálogo de permissões do escritório.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    async fn list_permissions(&self, law_firm_id: i64, language: &str) -> Result<Vec<Value>, RemoteError>;
}

// O backend embrulha a lista em { "data": [...] }
#[derive(Debug, Deserialize)]
struct PermissionListResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

pub struct RemotePermissionCatalog {
    client: Client,
    url: String,
}

impl RemotePermissionCatalog {
    pub fn new(client: Client, backend_url: &str, path: &str) -> Self {
        Self {
            client,
            url: join_url(backend_url, path),
        }
    }
}

#[async_trait]
impl PermissionCatalogRepository for RemotePermissionCatalog {
    async fn list_permissions(&self, law_firm_id: i64, language: &str) -> Result<Vec<Value>, RemoteError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("law_firm_id", law_firm_id.to_string())])
            .header(ACCEPT_LANGUAGE, language)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let body: PermissionListResponse = decode(ensure_success(resp).await?).await?;
        Ok(body.data.unwrap_or_default())
    }
}

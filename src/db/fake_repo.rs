// src/db/fake_repo.rs
//
// Repositórios em memória para os testes dos controladores.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::common::error::RemoteError;
use crate::db::rbac_repo::PermissionCatalogRepository;
use crate::db::remote_repo::CollectionRepository;
use crate::models::listing::Resource;

fn unavailable() -> RemoteError {
    RemoteError::Status {
        status: 503,
        body: "offline".to_string(),
    }
}

/// Backend fora do ar: toda chamada falha.
pub struct OfflineRepository;

#[async_trait]
impl<R: Resource> CollectionRepository<R> for OfflineRepository {
    async fn list(&self) -> Result<Vec<R>, RemoteError> {
        Err(unavailable())
    }

    async fn create(&self, _payload: &R::Payload) -> Result<R, RemoteError> {
        Err(unavailable())
    }

    async fn update(&self, _id: i64, _payload: &R::Payload) -> Result<R, RemoteError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i64) -> Result<(), RemoteError> {
        Err(unavailable())
    }
}

#[async_trait]
impl PermissionCatalogRepository for OfflineRepository {
    async fn list_permissions(&self, _law_firm_id: i64, _language: &str) -> Result<Vec<Value>, RemoteError> {
        Err(unavailable())
    }
}

/// Backend "de mentira" que responde com o que foi programado.
pub struct ScriptedRepository<R> {
    pub listed: Vec<R>,
    pub created: Mutex<Option<R>>,
    pub updated: Mutex<Option<R>>,
    pub deletes: Mutex<Vec<i64>>,
}

impl<R> ScriptedRepository<R> {
    pub fn new(listed: Vec<R>) -> Self {
        Self {
            listed,
            created: Mutex::new(None),
            updated: Mutex::new(None),
            deletes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<R: Resource> CollectionRepository<R> for ScriptedRepository<R> {
    async fn list(&self) -> Result<Vec<R>, RemoteError> {
        Ok(self.listed.clone())
    }

    async fn create(&self, _payload: &R::Payload) -> Result<R, RemoteError> {
        self.created.lock().unwrap().take().ok_or_else(unavailable)
    }

    async fn update(&self, _id: i64, _payload: &R::Payload) -> Result<R, RemoteError> {
        self.updated.lock().unwrap().take().ok_or_else(unavailable)
    }

    async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        self.deletes.lock().unwrap().push(id);
        Ok(())
    }
}

#[async_trait]
impl<R: Send + Sync> PermissionCatalogRepository for ScriptedRepository<R> {
    async fn list_permissions(&self, law_firm_id: i64, language: &str) -> Result<Vec<Value>, RemoteError> {
        Ok(vec![serde_json::json!({ "lawFirmId": law_firm_id, "language": language })])
    }
}

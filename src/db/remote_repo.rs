// src/db/remote_repo.rs

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::error::RemoteError;
use crate::models::listing::Resource;

/// As quatro operações de uma coleção REST (`GET/POST <base>`, `PUT/DELETE <base>/<id>`).
///
/// Os controladores só conhecem esta interface, então o backend real pode
/// ser trocado por qualquer outra fonte.
#[async_trait]
pub trait CollectionRepository<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, RemoteError>;

    async fn create(&self, payload: &R::Payload) -> Result<R, RemoteError>;

    async fn update(&self, id: i64, payload: &R::Payload) -> Result<R, RemoteError>;

    async fn delete(&self, id: i64) -> Result<(), RemoteError>;
}

/// Coleção servida pelo backend via HTTP/JSON.
pub struct RemoteCollection<R> {
    client: Client,
    base_url: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RemoteCollection<R> {
    pub fn new(client: Client, backend_url: &str, path: &str) -> Self {
        Self {
            client,
            base_url: join_url(backend_url, path),
            _resource: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

pub(crate) fn join_url(backend_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        backend_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// Status fora de 2xx vira erro, com o corpo para o log.
pub(crate) async fn ensure_success(resp: Response) -> Result<Response, RemoteError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(RemoteError::Status { status, body });
    }
    Ok(resp)
}

pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, RemoteError> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| RemoteError::UnexpectedShape(e.to_string()))
}

#[async_trait]
impl<R: Resource> CollectionRepository<R> for RemoteCollection<R> {
    async fn list(&self) -> Result<Vec<R>, RemoteError> {
        let resp = self
            .client
            .get(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let body: Value = decode(ensure_success(resp).await?).await?;

        // Qualquer coisa que não seja array conta como formato inesperado.
        if !body.is_array() {
            return Err(RemoteError::UnexpectedShape(format!(
                "esperava um array em GET {}",
                self.base_url
            )));
        }
        serde_json::from_value(body).map_err(|e| RemoteError::UnexpectedShape(e.to_string()))
    }

    async fn create(&self, payload: &R::Payload) -> Result<R, RemoteError> {
        let resp = self.client.post(&self.base_url).json(payload).send().await?;
        decode(ensure_success(resp).await?).await
    }

    async fn update(&self, id: i64, payload: &R::Payload) -> Result<R, RemoteError> {
        let resp = self.client.put(self.item_url(id)).json(payload).send().await?;
        decode(ensure_success(resp).await?).await
    }

    async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        let resp = self
            .client
            .delete(self.item_url(id))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crm::Customer;

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let repo: RemoteCollection<Customer> =
            RemoteCollection::new(Client::new(), "http://backend:8080/", "/api/customers");
        assert_eq!(repo.base_url(), "http://backend:8080/api/customers");
        assert_eq!(repo.item_url(7), "http://backend:8080/api/customers/7");
    }
}

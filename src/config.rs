// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::sync::Mutex;

use crate::{
    common::i18n::I18nStore,
    db::{RemoteCollection, RemotePermissionCatalog},
    models::{crm::Customer, rbac::Role},
    services::{
        sync::{DeletePolicy, FallbackPolicy, SyncPolicy},
        CustomerListController, RoleListController,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub customers_path: String,
    pub roles_path: String,
    pub permissions_path: String,
    pub law_firm_id: i64,
    pub default_language: String,
    pub bind_addr: String,
    pub fallback_policy: FallbackPolicy,
    pub delete_policy: DeletePolicy,
    // Sem valor, vale o padrão do transporte.
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8080".to_string(),
            customers_path: "/api/customers".to_string(),
            roles_path: "/api/v1/admin/roles".to_string(),
            permissions_path: "/api/v1/admin/permissions/list".to_string(),
            law_firm_id: 1,
            default_language: "en".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            fallback_policy: FallbackPolicy::default(),
            delete_policy: DeletePolicy::default(),
            request_timeout: None,
        }
    }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, env::var(key).ok())
}

// Valor ausente ou em branco fica com o padrão; valor inválido é erro.
fn parse_value<T>(key: &str, raw: Option<String>) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key} inválida ('{raw}'): {e}")),
        _ => Ok(None),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Some(v) = parse_var::<String>("BACKEND_URL")? {
            config.backend_url = v;
        }
        if let Some(v) = parse_var::<String>("CUSTOMERS_PATH")? {
            config.customers_path = v;
        }
        if let Some(v) = parse_var::<String>("ROLES_PATH")? {
            config.roles_path = v;
        }
        if let Some(v) = parse_var::<String>("PERMISSIONS_PATH")? {
            config.permissions_path = v;
        }
        if let Some(v) = parse_var::<i64>("LAW_FIRM_ID")? {
            config.law_firm_id = v;
        }
        if let Some(v) = parse_var::<String>("DEFAULT_LANGUAGE")? {
            config.default_language = v.to_lowercase();
        }
        if let Some(v) = parse_var::<String>("BIND_ADDR")? {
            config.bind_addr = v;
        }
        if let Some(v) = parse_var::<FallbackPolicy>("FALLBACK_POLICY")? {
            config.fallback_policy = v;
        }
        if let Some(v) = parse_var::<DeletePolicy>("DELETE_POLICY")? {
            config.delete_policy = v;
        }
        if let Some(secs) = parse_var::<u64>("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        SyncPolicy {
            fallback: self.fallback_policy,
            delete: self.delete_policy,
        }
    }

    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Falha ao criar o cliente HTTP")
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub i18n_store: I18nStore,
    // Cada tela é alterada por um handler de cada vez.
    pub customers: Arc<Mutex<CustomerListController>>,
    pub roles: Arc<Mutex<RoleListController>>,
}

impl AppState {
    /// Monta os controladores e faz a carga inicial das duas telas.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::new();
        if !i18n_store.supports(&config.default_language) {
            tracing::warn!(
                "Idioma '{}' sem catálogo próprio, textos cairão para inglês",
                config.default_language
            );
        }

        let client = config.http_client()?;
        let policy = config.sync_policy();

        // --- Monta o gráfico de dependências ---
        let customer_repo = Arc::new(RemoteCollection::<Customer>::new(
            client.clone(),
            &config.backend_url,
            &config.customers_path,
        ));
        let role_repo = Arc::new(RemoteCollection::<Role>::new(
            client.clone(),
            &config.backend_url,
            &config.roles_path,
        ));
        let catalog_repo = Arc::new(RemotePermissionCatalog::new(
            client,
            &config.backend_url,
            &config.permissions_path,
        ));

        let mut customers = CustomerListController::new(customer_repo, policy, config.law_firm_id);
        let mut roles = RoleListController::new(
            role_repo,
            catalog_repo,
            policy,
            config.law_firm_id,
            &i18n_store,
            &config.default_language,
        );

        customers.mount().await;
        roles.mount(&config.default_language).await;
        tracing::info!("✅ Telas de clientes e cargos carregadas (backend: {})", config.backend_url);

        Ok(Self {
            i18n_store,
            customers: Arc::new(Mutex::new(customers)),
            roles: Arc::new(Mutex::new(roles)),
        })
    }
}

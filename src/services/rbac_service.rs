// src/services/rbac_service.rs

use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::{
    common::error::AppError,
    common::i18n::I18nStore,
    db::{CollectionRepository, PermissionCatalogRepository},
    models::form::{FormMode, FormState},
    models::listing::PageView,
    models::rbac::{seeded_roles, Role, RoleForm, RoleStats},
    services::collection_service::CollectionController,
    services::sync::{SyncOutcome, SyncPolicy},
};

pub const ROLE_PAGE_SIZE: usize = 5;

pub const DELETE_CONFIRMATION_KEY: &str = "roles.delete.confirmation";

/// A tela de cargos: lista, formulário, toggle de ativo e estatísticas.
pub struct RoleListController {
    list: CollectionController<Role>,
    form: FormState<RoleForm>,
    catalog_repo: Arc<dyn PermissionCatalogRepository>,
    // Guardado como veio do backend. A seleção de permissões usa o catálogo fixo.
    remote_permissions: Vec<Value>,
    law_firm_id: i64,
}

impl RoleListController {
    pub fn new(
        repo: Arc<dyn CollectionRepository<Role>>,
        catalog_repo: Arc<dyn PermissionCatalogRepository>,
        policy: SyncPolicy,
        law_firm_id: i64,
        store: &I18nStore,
        language: &str,
    ) -> Self {
        Self {
            list: CollectionController::new("cargos", repo, seeded_roles(store, language), ROLE_PAGE_SIZE, policy),
            form: FormState::closed(),
            catalog_repo,
            remote_permissions: Vec::new(),
            law_firm_id,
        }
    }

    /// Carga inicial: cargos e catálogo remoto de permissões.
    pub async fn mount(&mut self, language: &str) -> SyncOutcome<usize> {
        self.load_permission_catalog(language).await;
        self.list.refresh().await
    }

    pub async fn refresh(&mut self) -> SyncOutcome<usize> {
        self.list.refresh().await
    }

    // Falha aqui só vai para o log.
    pub async fn load_permission_catalog(&mut self, language: &str) {
        match self.catalog_repo.list_permissions(self.law_firm_id, language).await {
            Ok(permissions) => {
                tracing::info!("cargos: {} permissões recebidas do backend", permissions.len());
                self.remote_permissions = permissions;
            }
            Err(e) => tracing::error!("cargos: falha ao buscar catálogo de permissões: {}", e),
        }
    }

    pub fn remote_permissions(&self) -> &[Value] {
        &self.remote_permissions
    }

    pub fn list(&self) -> &CollectionController<Role> {
        &self.list
    }

    pub fn get(&self, id: i64) -> Result<&Role, AppError> {
        self.list.get(id).ok_or(AppError::NotFound(id))
    }

    // --- Tabela ---

    pub fn set_search(&mut self, search: &str) {
        self.list.set_search(search);
    }

    pub fn set_guard_filter(&mut self, guard: &str) {
        self.list.set_filter(guard);
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    pub fn view(&self) -> PageView<Role> {
        self.list.view()
    }

    pub fn stats(&self) -> RoleStats {
        RoleStats::from_roles(self.list.records())
    }

    /// Inverte só o `is_active`, fora do formulário e sem passar pelo backend.
    pub fn toggle_active(&mut self, id: i64) -> Result<&Role, AppError> {
        self.list.modify_local(id, |role| role.is_active = !role.is_active)
    }

    // --- Formulário ---

    pub fn form(&self) -> &FormState<RoleForm> {
        &self.form
    }

    pub fn open_create(&mut self) -> &RoleForm {
        self.form.open_create();
        &self.form.draft
    }

    pub fn open_edit(&mut self, id: i64) -> Result<&RoleForm, AppError> {
        let draft = RoleForm::from_role(self.get(id)?);
        self.form.open_edit(id, draft);
        Ok(&self.form.draft)
    }

    /// Valida, deriva o nome interno e cria/atualiza conforme o modo.
    pub async fn save(&mut self, draft: RoleForm) -> Result<SyncOutcome<Role>, AppError> {
        self.form.draft = draft;
        self.form.draft.validate()?;

        let payload = self.form.draft.to_payload();
        let outcome = match self.form.mode {
            FormMode::Edit(id) => self.list.update(id, &payload).await?,
            FormMode::Create => self.list.create(&payload).await?,
        };

        self.form.close();
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Result<SyncOutcome<i64>, AppError> {
        if !confirmed {
            return Err(AppError::DeleteNotConfirmed(DELETE_CONFIRMATION_KEY));
        }
        self.list.delete(id).await
    }
}

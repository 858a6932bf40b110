// src/services/crm_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::CollectionRepository,
    models::crm::{seeded_customers, Customer, CustomerForm},
    models::form::{FormMode, FormState},
    models::listing::PageView,
    services::collection_service::CollectionController,
    services::sync::{SyncOutcome, SyncPolicy},
};

pub const CUSTOMER_PAGE_SIZE: usize = 6;

/// Chave da pergunta exibida antes de excluir um cliente.
pub const DELETE_CONFIRMATION_KEY: &str = "customers.delete.confirmation";

/// A tela de clientes: lista sincronizada + formulário de criação/edição.
pub struct CustomerListController {
    list: CollectionController<Customer>,
    form: FormState<CustomerForm>,
    default_tenant_id: i64,
}

impl CustomerListController {
    pub fn new(repo: Arc<dyn CollectionRepository<Customer>>, policy: SyncPolicy, default_tenant_id: i64) -> Self {
        Self {
            list: CollectionController::new("clientes", repo, seeded_customers(), CUSTOMER_PAGE_SIZE, policy),
            form: FormState::closed(),
            default_tenant_id,
        }
    }

    /// Carga inicial (ao montar a tela).
    pub async fn mount(&mut self) -> SyncOutcome<usize> {
        self.list.refresh().await
    }

    pub fn list(&self) -> &CollectionController<Customer> {
        &self.list
    }

    pub fn get(&self, id: i64) -> Result<&Customer, AppError> {
        self.list.get(id).ok_or(AppError::NotFound(id))
    }

    // --- Tabela ---

    pub fn set_search(&mut self, search: &str) {
        self.list.set_search(search);
    }

    /// Filtro por tipo. Clientes não têm tipo: só `all` mostra alguma coisa.
    pub fn set_type_filter(&mut self, filter: &str) {
        self.list.set_filter(filter);
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    pub fn view(&self) -> PageView<Customer> {
        self.list.view()
    }

    // --- Formulário ---

    pub fn form(&self) -> &FormState<CustomerForm> {
        &self.form
    }

    pub fn open_create(&mut self) -> &CustomerForm {
        self.form.open_create();
        &self.form.draft
    }

    pub fn open_edit(&mut self, id: i64) -> Result<&CustomerForm, AppError> {
        let draft = CustomerForm::from_customer(self.get(id)?);
        self.form.open_edit(id, draft);
        Ok(&self.form.draft)
    }

    /// Valida o rascunho e cria ou atualiza conforme o modo do formulário.
    ///
    /// Se a validação falhar o formulário continua aberto com o rascunho.
    pub async fn save(&mut self, draft: CustomerForm) -> Result<SyncOutcome<Customer>, AppError> {
        self.form.draft = draft;
        self.form.draft.validate()?;

        let payload = self.form.draft.to_payload(self.default_tenant_id);
        let outcome = match self.form.mode {
            FormMode::Edit(id) => self.list.update(id, &payload).await?,
            FormMode::Create => self.list.create(&payload).await?,
        };

        self.form.close();
        Ok(outcome)
    }

    /// Só exclui com confirmação do usuário.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Result<SyncOutcome<i64>, AppError> {
        if !confirmed {
            return Err(AppError::DeleteNotConfirmed(DELETE_CONFIRMATION_KEY));
        }
        self.list.delete(id).await
    }
}

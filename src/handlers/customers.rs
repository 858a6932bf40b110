// src/handlers/customers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::common::{DeleteParams, DeleteResponse, RefreshResponse, SaveResponse},
    middleware::i18n::Locale,
    models::crm::{Customer, CustomerForm},
    models::listing::{ListParams, PageView},
};

// GET /api/admin/customers
#[utoipa::path(
    get,
    path = "/api/admin/customers",
    tag = "Customers",
    params(ListParams),
    responses(
        (status = 200, description = "Página atual da tabela de clientes", body = PageView<Customer>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let mut customers = app_state.customers.lock().await;

    if let Some(search) = params.search.as_deref() {
        customers.set_search(search);
    }
    if let Some(filter) = params.filter.as_deref() {
        customers.set_type_filter(filter);
    }
    if let Some(page) = params.page {
        customers.set_page(page);
    }

    Json(customers.view())
}

// GET /api/admin/customers/{id}
#[utoipa::path(
    get,
    path = "/api/admin/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state.customers.lock().await;
    let customer = customers
        .get(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(customer.clone()))
}

// GET /api/admin/customers/form
#[utoipa::path(
    get,
    path = "/api/admin/customers/form",
    tag = "Customers",
    responses(
        (status = 200, description = "Rascunho vazio para criação", body = CustomerForm)
    )
)]
pub async fn new_customer_form(State(app_state): State<AppState>) -> impl IntoResponse {
    let mut customers = app_state.customers.lock().await;
    Json(customers.open_create().clone())
}

// GET /api/admin/customers/{id}/form
#[utoipa::path(
    get,
    path = "/api/admin/customers/{id}/form",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Rascunho preenchido para edição", body = CustomerForm),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn edit_customer_form(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mut customers = app_state.customers.lock().await;
    let draft = customers
        .open_edit(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(draft.clone()))
}

// POST /api/admin/customers
#[utoipa::path(
    post,
    path = "/api/admin/customers",
    tag = "Customers",
    request_body = CustomerForm,
    responses(
        (status = 201, description = "Cliente criado (no backend ou localmente)", body = SaveResponse<Customer>),
        (status = 400, description = "Nome em branco")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CustomerForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut customers = app_state.customers.lock().await;
    customers.open_create();

    let outcome = customers
        .save(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(SaveResponse::from(outcome))))
}

// PUT /api/admin/customers/{id}
#[utoipa::path(
    put,
    path = "/api/admin/customers/{id}",
    tag = "Customers",
    request_body = CustomerForm,
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente atualizado (no backend ou localmente)", body = SaveResponse<Customer>),
        (status = 400, description = "Nome em branco"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut customers = app_state.customers.lock().await;
    customers
        .open_edit(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = customers
        .save(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(SaveResponse::from(outcome))))
}

// DELETE /api/admin/customers/{id}?confirm=true
#[utoipa::path(
    delete,
    path = "/api/admin/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente"), DeleteParams),
    responses(
        (status = 200, description = "Cliente removido da lista", body = DeleteResponse),
        (status = 400, description = "Exclusão não confirmada"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut customers = app_state.customers.lock().await;
    let outcome = customers
        .delete(id, params.confirm)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(DeleteResponse::from(outcome)))
}

// POST /api/admin/customers/refresh
#[utoipa::path(
    post,
    path = "/api/admin/customers/refresh",
    tag = "Customers",
    responses(
        (status = 200, description = "Resultado da nova busca no backend", body = RefreshResponse)
    )
)]
pub async fn refresh_customers(State(app_state): State<AppState>) -> impl IntoResponse {
    let mut customers = app_state.customers.lock().await;
    Json(RefreshResponse::from(customers.mount().await))
}

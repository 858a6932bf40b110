// src/handlers/roles.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::common::{DeleteParams, DeleteResponse, RefreshResponse, SaveResponse},
    middleware::i18n::Locale,
    models::listing::{ListParams, PageView},
    models::rbac::{guard_options, permission_options, LabeledOption, Role, RoleForm, RoleStats},
};

// Catálogo fixo (o que o formulário usa) + o que veio do backend.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsResponse {
    pub catalog: Vec<LabeledOption>,
    pub remote: Vec<Value>,
}

// GET /api/admin/roles
#[utoipa::path(
    get,
    path = "/api/admin/roles",
    tag = "Roles",
    params(ListParams),
    responses(
        (status = 200, description = "Página atual da tabela de cargos", body = PageView<Role>)
    )
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let mut roles = app_state.roles.lock().await;

    if let Some(search) = params.search.as_deref() {
        roles.set_search(search);
    }
    if let Some(guard) = params.filter.as_deref() {
        roles.set_guard_filter(guard);
    }
    if let Some(page) = params.page {
        roles.set_page(page);
    }

    Json(roles.view())
}

// GET /api/admin/roles/{id}
#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}",
    tag = "Roles",
    params(("id" = i64, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo", body = Role),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let roles = app_state.roles.lock().await;
    let role = roles
        .get(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(role.clone()))
}

// GET /api/admin/roles/form
#[utoipa::path(
    get,
    path = "/api/admin/roles/form",
    tag = "Roles",
    responses(
        (status = 200, description = "Rascunho padrão (guarda admin, ativo)", body = RoleForm)
    )
)]
pub async fn new_role_form(State(app_state): State<AppState>) -> impl IntoResponse {
    let mut roles = app_state.roles.lock().await;
    Json(roles.open_create().clone())
}

// GET /api/admin/roles/{id}/form
#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}/form",
    tag = "Roles",
    params(("id" = i64, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Rascunho preenchido para edição", body = RoleForm),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn edit_role_form(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mut roles = app_state.roles.lock().await;
    let draft = roles
        .open_edit(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(draft.clone()))
}

// POST /api/admin/roles
#[utoipa::path(
    post,
    path = "/api/admin/roles",
    tag = "Roles",
    request_body = RoleForm,
    responses(
        (status = 201, description = "Cargo criado (no backend ou localmente)", body = SaveResponse<Role>),
        (status = 400, description = "Nome de exibição em branco")
    )
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RoleForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut roles = app_state.roles.lock().await;
    roles.open_create();

    let outcome = roles
        .save(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(SaveResponse::from(outcome))))
}

// PUT /api/admin/roles/{id}
#[utoipa::path(
    put,
    path = "/api/admin/roles/{id}",
    tag = "Roles",
    request_body = RoleForm,
    params(("id" = i64, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo atualizado (no backend ou localmente)", body = SaveResponse<Role>),
        (status = 400, description = "Nome de exibição em branco"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<RoleForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut roles = app_state.roles.lock().await;
    roles
        .open_edit(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = roles
        .save(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(SaveResponse::from(outcome))))
}

// PATCH /api/admin/roles/{id}/active
#[utoipa::path(
    patch,
    path = "/api/admin/roles/{id}/active",
    tag = "Roles",
    params(("id" = i64, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo com o status invertido", body = Role),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn toggle_role_active(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mut roles = app_state.roles.lock().await;
    let role = roles
        .toggle_active(id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!("cargo {} agora está {}", role.id, if role.is_active { "ativo" } else { "inativo" });
    Ok(Json(role.clone()))
}

// DELETE /api/admin/roles/{id}?confirm=true
#[utoipa::path(
    delete,
    path = "/api/admin/roles/{id}",
    tag = "Roles",
    params(("id" = i64, Path, description = "ID do cargo"), DeleteParams),
    responses(
        (status = 200, description = "Cargo removido da lista", body = DeleteResponse),
        (status = 400, description = "Exclusão não confirmada"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut roles = app_state.roles.lock().await;
    let outcome = roles
        .delete(id, params.confirm)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(DeleteResponse::from(outcome)))
}

// GET /api/admin/roles/stats
#[utoipa::path(
    get,
    path = "/api/admin/roles/stats",
    tag = "Roles",
    responses(
        (status = 200, description = "Ativos, inativos e operação jurídica", body = RoleStats)
    )
)]
pub async fn role_stats(State(app_state): State<AppState>) -> impl IntoResponse {
    let roles = app_state.roles.lock().await;
    Json(roles.stats())
}

// GET /api/admin/roles/permissions
#[utoipa::path(
    get,
    path = "/api/admin/roles/permissions",
    tag = "Roles",
    responses(
        (status = 200, description = "Catálogo de permissões traduzido", body = PermissionsResponse)
    )
)]
pub async fn list_permissions(State(app_state): State<AppState>, locale: Locale) -> impl IntoResponse {
    let roles = app_state.roles.lock().await;
    Json(PermissionsResponse {
        catalog: permission_options(&app_state.i18n_store, &locale.0),
        remote: roles.remote_permissions().to_vec(),
    })
}

// GET /api/admin/roles/guards
#[utoipa::path(
    get,
    path = "/api/admin/roles/guards",
    tag = "Roles",
    responses(
        (status = 200, description = "Guardas disponíveis, traduzidas", body = Vec<LabeledOption>)
    )
)]
pub async fn list_guards(State(app_state): State<AppState>, locale: Locale) -> impl IntoResponse {
    Json(guard_options(&app_state.i18n_store, &locale.0))
}

// POST /api/admin/roles/refresh
#[utoipa::path(
    post,
    path = "/api/admin/roles/refresh",
    tag = "Roles",
    responses(
        (status = 200, description = "Resultado da nova busca no backend", body = RefreshResponse)
    )
)]
pub async fn refresh_roles(State(app_state): State<AppState>, locale: Locale) -> impl IntoResponse {
    let mut roles = app_state.roles.lock().await;
    Json(RefreshResponse::from(roles.mount(&locale.0).await))
}

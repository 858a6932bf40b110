// src/lib.rs

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

/// Monta o router completo da API administrativa.
pub fn app(app_state: AppState) -> Router {
    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route("/form", get(handlers::customers::new_customer_form))
        .route("/refresh", post(handlers::customers::refresh_customers))
        .route(
            "/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route("/{id}/form", get(handlers::customers::edit_customer_form));

    let role_routes = Router::new()
        .route(
            "/",
            get(handlers::roles::list_roles).post(handlers::roles::create_role),
        )
        .route("/form", get(handlers::roles::new_role_form))
        .route("/refresh", post(handlers::roles::refresh_roles))
        .route("/stats", get(handlers::roles::role_stats))
        .route("/permissions", get(handlers::roles::list_permissions))
        .route("/guards", get(handlers::roles::list_guards))
        .route(
            "/{id}",
            get(handlers::roles::get_role)
                .put(handlers::roles::update_role)
                .delete(handlers::roles::delete_role),
        )
        .route("/{id}/form", get(handlers::roles::edit_role_form))
        .route("/{id}/active", patch(handlers::roles::toggle_role_active));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/admin/customers", customer_routes)
        .nest("/api/admin/roles", role_routes)
        .with_state(app_state)
}

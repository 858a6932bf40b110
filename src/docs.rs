// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Customers ---
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::new_customer_form,
        handlers::customers::edit_customer_form,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::refresh_customers,

        // --- Roles ---
        handlers::roles::list_roles,
        handlers::roles::get_role,
        handlers::roles::new_role_form,
        handlers::roles::edit_role_form,
        handlers::roles::create_role,
        handlers::roles::update_role,
        handlers::roles::toggle_role_active,
        handlers::roles::delete_role,
        handlers::roles::role_stats,
        handlers::roles::list_permissions,
        handlers::roles::list_guards,
        handlers::roles::refresh_roles,
    ),
    components(
        schemas(
            // --- CRM ---
            models::crm::Customer,
            models::crm::CustomerForm,

            // --- RBAC ---
            models::rbac::Guard,
            models::rbac::Permission,
            models::rbac::Role,
            models::rbac::RoleForm,
            models::rbac::RoleStats,
            models::rbac::LabeledOption,
            handlers::roles::PermissionsResponse,

            // --- Sincronização ---
            services::sync::SyncState,
            handlers::common::DeleteResponse,
            handlers::common::RefreshResponse,
        )
    ),
    tags(
        (name = "Customers", description = "Tabela de clientes do escritório"),
        (name = "Roles", description = "Cargos e permissões (RBAC)")
    )
)]
pub struct ApiDoc;

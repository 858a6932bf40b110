// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::i18n::I18nStore;
use crate::models::form::validate_not_blank;
use crate::models::listing::Resource;

// --- ENUMS ---

/// Categoria do cargo (define quais permissões e traduções ele usa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    #[default]
    Admin,
    Lawyer,
    Client,
    Paralegal,
    Accountant,
}

impl Guard {
    pub const ALL: [Guard; 5] = [
        Guard::Admin,
        Guard::Lawyer,
        Guard::Client,
        Guard::Paralegal,
        Guard::Accountant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Guard::Admin => "admin",
            Guard::Lawyer => "lawyer",
            Guard::Client => "client",
            Guard::Paralegal => "paralegal",
            Guard::Accountant => "accountant",
        }
    }

    // Advogados e paralegais contam como "operação jurídica".
    pub fn is_legal_ops(&self) -> bool {
        matches!(self, Guard::Lawyer | Guard::Paralegal)
    }
}

/// O catálogo fixo de permissões concedíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ShowPanel,
    CreateCases,
    EditCases,
    DeleteCases,
    ViewCases,
    PrepareDocuments,
    SupportLawyers,
    ViewReports,
    ManagePayments,
    ViewOwnCases,
}

impl Permission {
    pub const CATALOG: [Permission; 11] = [
        Permission::ManageUsers,
        Permission::ShowPanel,
        Permission::CreateCases,
        Permission::EditCases,
        Permission::DeleteCases,
        Permission::ViewCases,
        Permission::PrepareDocuments,
        Permission::SupportLawyers,
        Permission::ViewReports,
        Permission::ManagePayments,
        Permission::ViewOwnCases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageUsers => "manage_users",
            Permission::ShowPanel => "show_panel",
            Permission::CreateCases => "create_cases",
            Permission::EditCases => "edit_cases",
            Permission::DeleteCases => "delete_cases",
            Permission::ViewCases => "view_cases",
            Permission::PrepareDocuments => "prepare_documents",
            Permission::SupportLawyers => "support_lawyers",
            Permission::ViewReports => "view_reports",
            Permission::ManagePayments => "manage_payments",
            Permission::ViewOwnCases => "view_own_cases",
        }
    }
}

// --- CARGO ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = 2)]
    pub id: i64,

    /// Nome interno, derivado do nome de exibição.
    #[schema(example = "senior_lawyer")]
    pub name: String,

    #[schema(example = "Senior Lawyer")]
    pub display_name: String,

    pub guard: Guard,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,

    // Backend que omite o campo: cargo ativo.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// O que vai no corpo do POST/PUT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    pub name: String,
    pub display_name: String,
    pub guard: Guard,
    pub description: String,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
}

/// "Senior  Lawyer" -> "senior_lawyer"
pub fn normalize_role_name(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Rascunho do formulário de cargo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleForm {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Senior Lawyer")]
    pub display_name: String,

    pub guard: Guard,
    pub description: String,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
}

impl Default for RoleForm {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            guard: Guard::Admin,
            description: String::new(),
            permissions: Vec::new(),
            is_active: true,
        }
    }
}

impl RoleForm {
    pub fn from_role(role: &Role) -> Self {
        Self {
            display_name: role.display_name.clone(),
            guard: role.guard,
            description: role.description.clone(),
            permissions: role.permissions.clone(),
            is_active: role.is_active,
        }
    }

    // Liga/desliga por pertinência: nunca duplica.
    pub fn toggle_permission(&mut self, permission: Permission) {
        if let Some(pos) = self.permissions.iter().position(|p| *p == permission) {
            self.permissions.remove(pos);
        } else {
            self.permissions.push(permission);
        }
    }

    pub fn to_payload(&self) -> RolePayload {
        let mut permissions = Vec::with_capacity(self.permissions.len());
        for permission in &self.permissions {
            if !permissions.contains(permission) {
                permissions.push(*permission);
            }
        }

        RolePayload {
            name: normalize_role_name(&self.display_name),
            display_name: self.display_name.clone(),
            guard: self.guard,
            description: self.description.clone(),
            permissions,
            is_active: self.is_active,
        }
    }
}

impl Role {
    fn from_payload(id: i64, payload: &RolePayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            display_name: payload.display_name.clone(),
            guard: payload.guard,
            description: payload.description.clone(),
            permissions: payload.permissions.clone(),
            is_active: payload.is_active,
        }
    }
}

impl Resource for Role {
    type Payload = RolePayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    // O maior + 1. Se o maior já for i64::MAX, o menor id positivo livre.
    fn next_local_id(existing: &[Self]) -> i64 {
        match existing.iter().map(|r| r.id).max() {
            None => 1,
            Some(max) => max.checked_add(1).unwrap_or_else(|| {
                (1..=i64::MAX)
                    .find(|id| existing.iter().all(|r| r.id != *id))
                    .unwrap_or(1)
            }),
        }
    }

    fn matches_search(&self, term: &str) -> bool {
        self.display_name.to_lowercase().contains(term)
            || self.permissions.iter().any(|p| p.as_str().contains(term))
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.guard.as_str() == filter
    }

    fn offline_create(payload: &RolePayload, existing: &[Self]) -> Self {
        Self::from_payload(Self::next_local_id(existing), payload)
    }

    fn offline_update(id: i64, payload: &RolePayload, _previous: Option<&Self>) -> Self {
        Self::from_payload(id, payload)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleStats {
    pub active: usize,
    pub inactive: usize,
    pub legal_ops: usize,
}

impl RoleStats {
    pub fn from_roles(roles: &[Role]) -> Self {
        let active = roles.iter().filter(|r| r.is_active).count();
        Self {
            active,
            inactive: roles.len() - active,
            legal_ops: roles.iter().filter(|r| r.guard.is_legal_ops()).count(),
        }
    }
}

// Opção traduzida para selects (guardas e permissões)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LabeledOption {
    pub key: String,
    pub label: String,
}

pub fn guard_options(store: &I18nStore, lang: &str) -> Vec<LabeledOption> {
    Guard::ALL
        .iter()
        .map(|g| LabeledOption {
            key: g.as_str().to_string(),
            label: store.translate(lang, &format!("roles.guard.{}", g.as_str())),
        })
        .collect()
}

pub fn permission_options(store: &I18nStore, lang: &str) -> Vec<LabeledOption> {
    Permission::CATALOG
        .iter()
        .map(|p| LabeledOption {
            key: p.as_str().to_string(),
            label: store.translate(lang, &format!("permissions.{}", p.as_str())),
        })
        .collect()
}

/// Os cinco cargos de exemplo, com nome e descrição no idioma pedido.
pub fn seeded_roles(store: &I18nStore, lang: &str) -> Vec<Role> {
    use Permission::*;

    let seeds: [(i64, &str, Guard, Vec<Permission>, bool); 5] = [
        (1, "system_admin", Guard::Admin, vec![ManageUsers, ShowPanel, CreateCases, ViewReports], true),
        (2, "lawyer", Guard::Lawyer, vec![ViewCases, EditCases, PrepareDocuments], true),
        (3, "client", Guard::Client, vec![ViewOwnCases], true),
        (4, "paralegal", Guard::Paralegal, vec![PrepareDocuments, SupportLawyers], true),
        (5, "accountant", Guard::Accountant, vec![ViewReports, ManagePayments], false),
    ];

    seeds
        .into_iter()
        .map(|(id, name, guard, permissions, is_active)| Role {
            id,
            name: name.to_string(),
            display_name: store.translate(lang, &format!("roles.seed.{name}.name")),
            guard,
            description: store.translate(lang, &format!("roles.seed.{name}.description")),
            permissions,
            is_active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_collapse_whitespace_runs() {
        assert_eq!(normalize_role_name("Senior  Lawyer"), "senior_lawyer");
        assert_eq!(normalize_role_name("  Head of\tFinance "), "head_of_finance");
    }

    #[test]
    fn toggling_a_permission_twice_removes_it() {
        let mut form = RoleForm::default();
        form.toggle_permission(Permission::ViewCases);
        form.toggle_permission(Permission::EditCases);
        assert_eq!(form.permissions, vec![Permission::ViewCases, Permission::EditCases]);

        form.toggle_permission(Permission::ViewCases);
        assert_eq!(form.permissions, vec![Permission::EditCases]);
    }

    #[test]
    fn payload_derives_the_internal_name() {
        let form = RoleForm {
            display_name: "Senior  Lawyer".to_string(),
            guard: Guard::Lawyer,
            ..Default::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.name, "senior_lawyer");
        assert_eq!(payload.display_name, "Senior  Lawyer");
        assert!(payload.is_active);
    }

    #[test]
    fn offline_create_uses_max_plus_one() {
        let store = I18nStore::new();
        let roles = seeded_roles(&store, "en");
        let payload = RoleForm {
            display_name: "Intern".to_string(),
            ..Default::default()
        }
        .to_payload();

        assert_eq!(Role::offline_create(&payload, &roles).id, 6);
        assert_eq!(Role::offline_create(&payload, &[]).id, 1);
    }

    #[test]
    fn search_matches_display_name_or_permission_key() {
        let store = I18nStore::new();
        let roles = seeded_roles(&store, "en");
        assert!(roles[1].matches_search("lawyer"));
        assert!(roles[4].matches_search("payments"));
        assert!(!roles[2].matches_search("payments"));
    }

    #[test]
    fn stats_count_active_inactive_and_legal_ops() {
        let store = I18nStore::new();
        let stats = RoleStats::from_roles(&seeded_roles(&store, "en"));
        assert_eq!(stats, RoleStats { active: 4, inactive: 1, legal_ops: 2 });
    }

    #[test]
    fn seeds_are_localized() {
        let store = I18nStore::new();
        let roles = seeded_roles(&store, "ar");
        assert_eq!(roles[1].display_name, "محامٍ");
        assert_eq!(roles[1].name, "lawyer");
    }

    #[test]
    fn role_json_uses_camel_case() {
        let json = r#"{"id":9,"name":"x","displayName":"X","guard":"paralegal","description":"","permissions":["view_cases"],"isActive":false}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.guard, Guard::Paralegal);
        assert_eq!(role.permissions, vec![Permission::ViewCases]);
        assert!(!role.is_active);
    }

    #[test]
    fn missing_is_active_defaults_to_active() {
        let json = r#"{"id":3,"name":"client","displayName":"Client","guard":"client"}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert!(role.is_active);
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn offline_id_does_not_overflow_at_i64_max() {
        let store = I18nStore::new();
        let mut roles = seeded_roles(&store, "en");
        roles[0].id = i64::MAX;
        let payload = RoleForm {
            display_name: "Intern".to_string(),
            ..Default::default()
        }
        .to_payload();

        // ids 2..=5 ainda estão ocupados; o 1 ficou livre
        assert_eq!(Role::offline_create(&payload, &roles).id, 1);

        roles[0].id = 1;
        roles[1].id = i64::MAX;
        assert_eq!(Role::offline_create(&payload, &roles).id, 2);
    }
}

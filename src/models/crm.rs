// src/models/crm.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::form::validate_not_blank;
use crate::models::listing::Resource;

// --- CLIENTE (O Dado) ---
// O backend fala snake_case nesse recurso.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub tenant_id: i64,

    #[serde(default)]
    pub branch_id: Option<i64>,

    #[schema(example = "Oman Tech LLC")]
    pub full_name: String,

    #[serde(default)]
    #[schema(example = "شركة عمان للتقنية")]
    pub full_name_ar: Option<String>,

    #[serde(default)]
    #[schema(example = "+968 95 654321")]
    pub phone: Option<String>,

    #[serde(default)]
    #[schema(example = "info@omantech.com")]
    pub email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub address_ar: Option<String>,

    #[serde(default)]
    #[schema(value_type = f64, example = 50000.0)]
    pub credit_limit: Decimal,

    // Uma vez definido, nunca muda.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// O que vai no corpo do POST/PUT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub tenant_id: i64,
    pub branch_id: Option<i64>,
    pub full_name: String,
    pub full_name_ar: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub address_ar: String,
    pub credit_limit: Decimal,
}

/// Rascunho do formulário de cliente.
///
/// O limite de crédito não tem limite inferior aqui; só o nome é validado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CustomerForm {
    pub tenant_id: Option<i64>,
    pub branch_id: Option<i64>,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Test Co")]
    pub full_name: String,

    pub full_name_ar: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub address_ar: String,

    #[schema(value_type = f64, example = 0.0)]
    pub credit_limit: Decimal,
}

impl CustomerForm {
    // Campos opcionais ausentes viram string vazia no rascunho.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            tenant_id: Some(customer.tenant_id),
            branch_id: customer.branch_id,
            full_name: customer.full_name.clone(),
            full_name_ar: customer.full_name_ar.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
            email: customer.email.clone().unwrap_or_default(),
            address: customer.address.clone().unwrap_or_default(),
            address_ar: customer.address_ar.clone().unwrap_or_default(),
            credit_limit: customer.credit_limit,
        }
    }

    pub fn to_payload(&self, default_tenant_id: i64) -> CustomerPayload {
        CustomerPayload {
            tenant_id: self.tenant_id.unwrap_or(default_tenant_id),
            branch_id: self.branch_id,
            full_name: self.full_name.clone(),
            full_name_ar: self.full_name_ar.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            address_ar: self.address_ar.clone(),
            credit_limit: self.credit_limit,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Customer {
    fn from_payload(id: i64, payload: &CustomerPayload, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            tenant_id: payload.tenant_id,
            branch_id: payload.branch_id,
            full_name: payload.full_name.clone(),
            full_name_ar: non_empty(&payload.full_name_ar),
            phone: non_empty(&payload.phone),
            email: non_empty(&payload.email),
            address: non_empty(&payload.address),
            address_ar: non_empty(&payload.address_ar),
            credit_limit: payload.credit_limit,
            created_at,
        }
    }
}

impl Resource for Customer {
    type Payload = CustomerPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    // Hora atual em ms; dois fallbacks no mesmo milissegundo não podem colidir.
    fn next_local_id(existing: &[Self]) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while existing.iter().any(|c| c.id == id) {
            id = id.wrapping_add(1);
        }
        id
    }

    fn matches_search(&self, term: &str) -> bool {
        let contains = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(term));
        contains(Some(self.full_name.as_str())) || contains(self.email.as_deref()) || contains(self.phone.as_deref())
    }

    // Cliente não tem campo de tipo: qualquer filtro além de "all" esconde tudo.
    fn matches_filter(&self, _filter: &str) -> bool {
        false
    }

    fn offline_create(payload: &CustomerPayload, existing: &[Self]) -> Self {
        Self::from_payload(Self::next_local_id(existing), payload, Some(Utc::now()))
    }

    fn offline_update(id: i64, payload: &CustomerPayload, previous: Option<&Self>) -> Self {
        Self::from_payload(id, payload, previous.and_then(|c| c.created_at))
    }
}

/// Dados de exemplo exibidos antes (ou no lugar) do backend.
pub fn seeded_customers() -> Vec<Customer> {
    let date = |s: &str| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    };

    vec![
        Customer {
            id: 1,
            tenant_id: 1,
            branch_id: Some(1),
            full_name: "Ahmed Ali".to_string(),
            full_name_ar: Some("أحمد علي".to_string()),
            phone: Some("+968 99 123456".to_string()),
            email: Some("ahmed.ali@example.com".to_string()),
            address: Some("Muscat, Oman".to_string()),
            address_ar: Some("مسقط، عمان".to_string()),
            credit_limit: Decimal::from(10_000),
            created_at: date("2025-01-01T00:00:00Z"),
        },
        Customer {
            id: 2,
            tenant_id: 1,
            branch_id: Some(2),
            full_name: "Oman Tech LLC".to_string(),
            full_name_ar: Some("شركة عمان للتقنية".to_string()),
            phone: Some("+968 95 654321".to_string()),
            email: Some("info@omantech.com".to_string()),
            address: Some("Salalah, Oman".to_string()),
            address_ar: Some("صلالة، عمان".to_string()),
            credit_limit: Decimal::from(50_000),
            created_at: date("2025-02-01T00:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_draft_uses_empty_strings_for_missing_fields() {
        let customer = Customer {
            id: 9,
            tenant_id: 3,
            branch_id: None,
            full_name: "Bare".to_string(),
            full_name_ar: None,
            phone: None,
            email: None,
            address: None,
            address_ar: None,
            credit_limit: Decimal::ZERO,
            created_at: None,
        };
        let form = CustomerForm::from_customer(&customer);
        assert_eq!(form.tenant_id, Some(3));
        assert_eq!(form.phone, "");
        assert_eq!(form.full_name_ar, "");
    }

    #[test]
    fn negative_credit_limit_passes_validation() {
        let form = CustomerForm {
            full_name: "Debtor".to_string(),
            credit_limit: Decimal::from(-500),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn whitespace_name_fails_validation() {
        let form = CustomerForm {
            full_name: "   ".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn offline_update_keeps_the_original_creation_date() {
        let seeds = seeded_customers();
        let payload = CustomerForm::from_customer(&seeds[0]).to_payload(1);
        let updated = Customer::offline_update(1, &payload, Some(&seeds[0]));
        assert_eq!(updated.created_at, seeds[0].created_at);
        assert_eq!(updated.id, 1);
    }

    #[test]
    fn search_looks_at_name_email_and_phone() {
        let seeds = seeded_customers();
        assert!(seeds[1].matches_search("omantech"));
        assert!(seeds[0].matches_search("99 123"));
        assert!(seeds[0].matches_search("ahmed"));
        assert!(!seeds[0].matches_search("salalah"));
    }

    #[test]
    fn decodes_backend_json_with_missing_optionals() {
        let json = r#"{"id": 5, "tenant_id": 1, "full_name": "Minimal", "credit_limit": 12.5}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, 5);
        assert_eq!(customer.email, None);
        assert_eq!(customer.credit_limit, Decimal::new(125, 1));
    }
}

// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_LANG: &str = "en";

// (chave, inglês, árabe)
const MESSAGES: &[(&str, &str, &str)] = &[
    // --- Erros ---
    ("errors.validation", "One or more fields are invalid.", "حقل واحد أو أكثر غير صالح."),
    ("errors.not_found", "Record {{id}} was not found.", "السجل {{id}} غير موجود."),
    ("errors.remote", "The backend did not respond as expected.", "لم يستجب الخادم كما هو متوقع."),
    ("errors.internal", "An unexpected error occurred.", "حدث خطأ غير متوقع."),
    ("validation.not_blank", "This field is required.", "هذا الحقل مطلوب."),
    // --- Clientes ---
    ("customers.delete.confirmation", "Are you sure you want to delete this customer?", "هل أنت متأكد من حذف هذا العميل؟"),
    // --- Cargos (dados semeados) ---
    ("roles.seed.system_admin.name", "System Administrator", "مدير النظام"),
    ("roles.seed.system_admin.description", "Full access to users, panel and reports.", "صلاحيات كاملة على المستخدمين واللوحة والتقارير."),
    ("roles.seed.lawyer.name", "Lawyer", "محامٍ"),
    ("roles.seed.lawyer.description", "Works on cases and prepares documents.", "يعمل على القضايا ويجهز المستندات."),
    ("roles.seed.client.name", "Client", "عميل"),
    ("roles.seed.client.description", "Follows up on their own cases.", "يتابع قضاياه الخاصة."),
    ("roles.seed.paralegal.name", "Paralegal", "مساعد قانوني"),
    ("roles.seed.paralegal.description", "Supports lawyers with documents.", "يدعم المحامين في إعداد المستندات."),
    ("roles.seed.accountant.name", "Accountant", "محاسب"),
    ("roles.seed.accountant.description", "Handles payments and financial reports.", "يدير المدفوعات والتقارير المالية."),
    ("roles.delete.confirmation", "Are you sure you want to delete this role?", "هل أنت متأكد من حذف هذا الدور؟"),
    // --- Guardas ---
    ("roles.guard.admin", "Administration", "الإدارة"),
    ("roles.guard.lawyer", "Lawyers", "المحامون"),
    ("roles.guard.client", "Clients", "العملاء"),
    ("roles.guard.paralegal", "Paralegals", "المساعدون القانونيون"),
    ("roles.guard.accountant", "Accounting", "المحاسبة"),
    // --- Permissões ---
    ("permissions.manage_users", "Manage users", "إدارة المستخدمين"),
    ("permissions.show_panel", "Show admin panel", "عرض لوحة التحكم"),
    ("permissions.create_cases", "Create cases", "إنشاء القضايا"),
    ("permissions.edit_cases", "Edit cases", "تعديل القضايا"),
    ("permissions.delete_cases", "Delete cases", "حذف القضايا"),
    ("permissions.view_cases", "View cases", "عرض القضايا"),
    ("permissions.prepare_documents", "Prepare documents", "إعداد المستندات"),
    ("permissions.support_lawyers", "Support lawyers", "دعم المحامين"),
    ("permissions.view_reports", "View reports", "عرض التقارير"),
    ("permissions.manage_payments", "Manage payments", "إدارة المدفوعات"),
    ("permissions.view_own_cases", "View own cases", "عرض القضايا الخاصة"),
];

/// Mensagens traduzidas, carregadas uma vez e compartilhadas entre handlers.
#[derive(Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut en = HashMap::new();
        let mut ar = HashMap::new();
        for (key, en_text, ar_text) in MESSAGES {
            en.insert(key.to_string(), en_text.to_string());
            ar.insert(key.to_string(), ar_text.to_string());
        }

        let mut messages = HashMap::new();
        messages.insert("en".to_string(), en);
        messages.insert("ar".to_string(), ar);

        Self { messages: Arc::new(messages) }
    }

    /// Idiomas com catálogo próprio.
    pub fn supports(&self, lang: &str) -> bool {
        self.messages.contains_key(lang)
    }

    // Idioma desconhecido cai para inglês; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_then_to_the_key() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "permissions.view_cases"), "View cases");
        assert_eq!(store.translate("ar", "permissions.view_cases"), "عرض القضايا");
        assert_eq!(store.translate("en", "no.such.key"), "no.such.key");
    }

    #[test]
    fn every_message_has_both_languages() {
        for (key, en, ar) in MESSAGES {
            assert!(!en.is_empty(), "{key} sem inglês");
            assert!(!ar.is_empty(), "{key} sem árabe");
        }
    }
}

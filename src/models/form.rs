// src/models/form.rs

use serde::Serialize;
use validator::ValidationError;

// Nome/nome completo não pode ser vazio nem só espaços.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("validation.not_blank".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "camelCase")]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// O rascunho do modal de criação/edição.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState<D> {
    pub mode: FormMode,
    pub draft: D,
    pub is_open: bool,
}

impl<D: Default> FormState<D> {
    pub fn closed() -> Self {
        Self {
            mode: FormMode::Create,
            draft: D::default(),
            is_open: false,
        }
    }

    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.draft = D::default();
        self.is_open = true;
    }

    pub fn open_edit(&mut self, id: i64, draft: D) {
        self.mode = FormMode::Edit(id);
        self.draft = draft;
        self.is_open = true;
    }

    // Depois de salvar o modal fecha e o rascunho volta ao padrão.
    pub fn close(&mut self) {
        *self = Self::closed();
    }
}

// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Falhas ao falar com o backend remoto (a coleção REST).
// Os controladores decidem se isso vira fallback local ou erro de verdade.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("O servidor retornou {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Resposta em formato inesperado: {0}")]
    UnexpectedShape(String),
}

impl RemoteError {
    /// Código curto usado nas respostas da API administrativa.
    pub fn code(&self) -> &'static str {
        match self {
            RemoteError::Transport(_) => "transport",
            RemoteError::Status { .. } => "status",
            RemoteError::UnexpectedShape(_) => "unexpected_shape",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Registro {0} não encontrado")]
    NotFound(i64),

    // Carrega a chave da pergunta de confirmação que o cliente deve exibir.
    #[error("A exclusão precisa ser confirmada")]
    DeleteNotConfirmed(&'static str),

    #[error("Erro no backend remoto: {0}")]
    Remote(#[from] RemoteError),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que vai para o cliente HTTP, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    // Detalhes por campo (só para erros de validação)
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl AppError {
    /// Converte o erro interno numa resposta traduzida para o idioma do pedido.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            store.translate(lang, &key)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: store.translate(lang, "errors.validation"),
                    details: Some(details),
                }
            }
            AppError::NotFound(id) => ApiError {
                status: StatusCode::NOT_FOUND,
                message: store
                    .translate(lang, "errors.not_found")
                    .replace("{{id}}", &id.to_string()),
                details: None,
            },
            AppError::DeleteNotConfirmed(prompt_key) => ApiError {
                status: StatusCode::BAD_REQUEST,
                message: store.translate(lang, prompt_key),
                details: None,
            },
            AppError::Remote(e) => {
                tracing::warn!("Falha no backend remoto: {}", e);
                ApiError {
                    status: StatusCode::BAD_GATEWAY,
                    message: store.translate(lang, "errors.remote"),
                    details: None,
                }
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: store.translate(lang, "errors.internal"),
                    details: None,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.message, "details": details })),
            None => Json(json!({ "error": self.message })),
        };
        (self.status, body).into_response()
    }
}

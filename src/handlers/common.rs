// src/handlers/common.rs
//
// Corpos de resposta compartilhados pelas telas de clientes e cargos.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::services::sync::{SyncOutcome, SyncState};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse<T> {
    pub record: T,
    pub sync: SyncState,
    /// Código da falha remota quando o registro foi sintetizado localmente.
    pub reason: Option<String>,
}

impl<T> From<SyncOutcome<T>> for SaveResponse<T> {
    fn from(outcome: SyncOutcome<T>) -> Self {
        let sync = outcome.sync_state();
        let reason = outcome.reason().map(|r| r.code().to_string());
        Self {
            record: outcome.into_value(),
            sync,
            reason,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub id: i64,
    /// `false` quando o backend falhou e a remoção foi só local.
    pub remote_confirmed: bool,
    pub reason: Option<String>,
}

impl From<SyncOutcome<i64>> for DeleteResponse {
    fn from(outcome: SyncOutcome<i64>) -> Self {
        Self {
            remote_confirmed: outcome.is_synced(),
            reason: outcome.reason().map(|r| r.code().to_string()),
            id: outcome.into_value(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub synced: bool,
    pub total_records: usize,
    pub reason: Option<String>,
}

impl From<SyncOutcome<usize>> for RefreshResponse {
    fn from(outcome: SyncOutcome<usize>) -> Self {
        Self {
            synced: outcome.is_synced(),
            reason: outcome.reason().map(|r| r.code().to_string()),
            total_records: outcome.into_value(),
        }
    }
}

// A confirmação que na tela vinha do window.confirm
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

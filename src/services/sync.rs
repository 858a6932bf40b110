// src/services/sync.rs

use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::RemoteError;

/// Resultado de uma operação contra a coleção remota.
///
/// `Fallback` significa que o backend falhou e o valor foi decidido localmente.
#[derive(Debug)]
pub enum SyncOutcome<T> {
    Synced(T),
    Fallback { value: T, reason: RemoteError },
}

impl<T> SyncOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            SyncOutcome::Synced(value) => value,
            SyncOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            SyncOutcome::Synced(value) => value,
            SyncOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced(_))
    }

    pub fn reason(&self) -> Option<&RemoteError> {
        match self {
            SyncOutcome::Synced(_) => None,
            SyncOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn sync_state(&self) -> SyncState {
        if self.is_synced() {
            SyncState::Synced
        } else {
            SyncState::PendingLocal
        }
    }
}

/// Se o registro foi confirmado pelo backend ou só existe localmente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SyncState {
    Synced,
    PendingLocal,
}

/// O que fazer quando POST/PUT falham.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Sintetiza um registro local e segue em frente.
    #[default]
    Optimistic,
    /// Propaga o erro e não mexe na lista.
    Strict,
}

/// O que fazer quando o DELETE falha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Remove localmente de qualquer jeito.
    #[default]
    AlwaysLocal,
    /// Mantém o registro e devolve o erro.
    RequireRemote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncPolicy {
    pub fallback: FallbackPolicy,
    pub delete: DeletePolicy,
}

impl FromStr for FallbackPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(FallbackPolicy::Optimistic),
            "strict" => Ok(FallbackPolicy::Strict),
            other => anyhow::bail!("FALLBACK_POLICY inválida: '{other}' (use optimistic ou strict)"),
        }
    }
}

impl FromStr for DeletePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always_local" => Ok(DeletePolicy::AlwaysLocal),
            "require_remote" => Ok(DeletePolicy::RequireRemote),
            other => anyhow::bail!("DELETE_POLICY inválida: '{other}' (use always_local ou require_remote)"),
        }
    }
}

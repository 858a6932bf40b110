// src/services/collection_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::CollectionRepository,
    models::listing::{ListQuery, PageView, Resource, FILTER_ALL},
    services::listing::{clamp_page, filter_records, page_slice, total_pages},
    services::sync::{DeletePolicy, FallbackPolicy, SyncOutcome, SyncPolicy},
};

/// Coleção local sincronizada com uma coleção remota, mais o estado da tabela.
///
/// Toda alteração da lista é feita pelo `id`. Depois de cada alteração a
/// página atual é recolocada dentro de `[1, total_pages]`.
pub struct CollectionController<R: Resource> {
    label: &'static str,
    repo: Arc<dyn CollectionRepository<R>>,
    records: Vec<R>,
    // ids sintetizados localmente, ainda sem confirmação do backend
    pending_local: HashSet<i64>,
    query: ListQuery,
    page_size: usize,
    policy: SyncPolicy,
}

impl<R: Resource> CollectionController<R> {
    pub fn new(
        label: &'static str,
        repo: Arc<dyn CollectionRepository<R>>,
        seed: Vec<R>,
        page_size: usize,
        policy: SyncPolicy,
    ) -> Self {
        Self {
            label,
            repo,
            records: seed,
            pending_local: HashSet::new(),
            query: ListQuery::default(),
            page_size: page_size.max(1),
            policy,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.pending_local.contains(&id)
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    // =========================================================================
    //  SINCRONIZAÇÃO
    // =========================================================================

    /// Busca a coleção inteira. Em qualquer falha os dados atuais ficam.
    pub async fn refresh(&mut self) -> SyncOutcome<usize> {
        match self.repo.list().await {
            Ok(records) => {
                self.records = dedup_by_id(records);
                self.pending_local.clear();
                self.clamp_current_page();
                tracing::info!("{}: {} registros carregados do backend", self.label, self.records.len());
                SyncOutcome::Synced(self.records.len())
            }
            Err(reason) => {
                tracing::warn!("{}: falha ao buscar lista, mantendo dados locais: {}", self.label, reason);
                SyncOutcome::Fallback {
                    value: self.records.len(),
                    reason,
                }
            }
        }
    }

    pub async fn create(&mut self, payload: &R::Payload) -> Result<SyncOutcome<R>, AppError> {
        let outcome = match self.repo.create(payload).await {
            Ok(created) => SyncOutcome::Synced(created),
            Err(reason) => {
                if self.policy.fallback == FallbackPolicy::Strict {
                    return Err(reason.into());
                }
                tracing::warn!("{}: criação falhou, registro local sintetizado: {}", self.label, reason);
                SyncOutcome::Fallback {
                    value: R::offline_create(payload, &self.records),
                    reason,
                }
            }
        };

        let record = outcome.value().clone();
        let id = record.id();
        let local_clash = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .filter(|_| outcome.is_synced() && self.pending_local.contains(&id));

        if let Some(pos) = local_clash {
            // O servidor usou o id de um registro ainda local: o local ganha outro id.
            self.records.push(record);
            let new_id = R::next_local_id(&self.records);
            self.records[pos].set_id(new_id);
            self.pending_local.remove(&id);
            self.pending_local.insert(new_id);
            tracing::warn!(
                "{}: servidor criou o id {} que era de um registro local, que passou para {}",
                self.label,
                id,
                new_id
            );
        } else {
            // Registro já sincronizado com o mesmo id: o do servidor substitui.
            self.records.retain(|r| r.id() != id);
            if outcome.is_synced() {
                self.pending_local.remove(&id);
            } else {
                self.pending_local.insert(id);
            }
            self.records.push(record);
        }
        self.clamp_current_page();

        Ok(outcome)
    }

    pub async fn update(&mut self, id: i64, payload: &R::Payload) -> Result<SyncOutcome<R>, AppError> {
        if self.get(id).is_none() {
            return Err(AppError::NotFound(id));
        }

        let outcome = match self.repo.update(id, payload).await {
            Ok(updated) => SyncOutcome::Synced(updated),
            Err(reason) => {
                if self.policy.fallback == FallbackPolicy::Strict {
                    return Err(reason.into());
                }
                tracing::warn!("{}: atualização de {} falhou, aplicada localmente: {}", self.label, id, reason);
                SyncOutcome::Fallback {
                    value: R::offline_update(id, payload, self.get(id)),
                    reason,
                }
            }
        };

        let record = outcome.value().clone();
        if let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) {
            *slot = record.clone();
        }
        if outcome.is_synced() {
            self.pending_local.remove(&id);
            self.pending_local.remove(&record.id());
        } else {
            self.pending_local.insert(id);
        }

        Ok(outcome)
    }

    /// Remove o registro. Com `DeletePolicy::AlwaysLocal` a falha remota não impede a remoção.
    pub async fn delete(&mut self, id: i64) -> Result<SyncOutcome<i64>, AppError> {
        if self.get(id).is_none() {
            return Err(AppError::NotFound(id));
        }

        let outcome = match self.repo.delete(id).await {
            Ok(()) => SyncOutcome::Synced(id),
            Err(reason) => {
                if self.policy.delete == DeletePolicy::RequireRemote {
                    return Err(reason.into());
                }
                tracing::warn!("{}: exclusão de {} falhou no backend, removido localmente: {}", self.label, id, reason);
                SyncOutcome::Fallback { value: id, reason }
            }
        };

        self.remove_local(id);
        Ok(outcome)
    }

    /// Alteração puramente local (sem backend), como o toggle de ativo.
    pub fn modify_local(&mut self, id: i64, change: impl FnOnce(&mut R)) -> Result<&R, AppError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(AppError::NotFound(id))?;
        change(record);
        Ok(record)
    }

    fn remove_local(&mut self, id: i64) {
        self.records.retain(|r| r.id() != id);
        self.pending_local.remove(&id);
        self.clamp_current_page();
    }

    // =========================================================================
    //  BUSCA / FILTRO / PÁGINA
    // =========================================================================

    /// Mudar a busca volta para a página 1.
    pub fn set_search(&mut self, search: &str) {
        if self.query.search != search {
            self.query.search = search.to_string();
            self.query.page = 1;
        }
    }

    /// Mudar o filtro volta para a página 1.
    pub fn set_filter(&mut self, filter: &str) {
        let filter = if filter.is_empty() { FILTER_ALL } else { filter };
        if self.query.filter != filter {
            self.query.filter = filter.to_string();
            self.query.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = clamp_page(page, self.total_pages());
    }

    pub fn total_pages(&self) -> usize {
        let filtered = filter_records(&self.records, &self.query.search, &self.query.filter);
        total_pages(filtered.len(), self.page_size)
    }

    fn clamp_current_page(&mut self) {
        self.query.page = clamp_page(self.query.page, self.total_pages());
    }

    pub fn view(&self) -> PageView<R> {
        let filtered = filter_records(&self.records, &self.query.search, &self.query.filter);
        let pages = total_pages(filtered.len(), self.page_size);
        let page = clamp_page(self.query.page, pages);
        let items: Vec<R> = page_slice(&filtered, page, self.page_size)
            .iter()
            .map(|r| (*r).clone())
            .collect();
        let pending_ids = items
            .iter()
            .map(|r| r.id())
            .filter(|id| self.pending_local.contains(id))
            .collect();

        PageView {
            items,
            page,
            total_pages: pages,
            page_size: self.page_size,
            total_filtered: filtered.len(),
            total_records: self.records.len(),
            search: self.query.search.clone(),
            filter: self.query.filter.clone(),
            pending_ids,
        }
    }
}

// Mantém a primeira ocorrência de cada id.
fn dedup_by_id<R: Resource>(records: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::new();
    records.into_iter().filter(|r| seen.insert(r.id())).collect()
}

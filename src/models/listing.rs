// src/models/listing.rs

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Valor do filtro categórico que deixa tudo passar.
pub const FILTER_ALL: &str = "all";

/// Um registro que vive numa coleção remota e aparece numa tabela paginada.
///
/// O `id` é a única chave usada para alterar a lista local.
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Corpo enviado no POST/PUT (a entidade sem os campos do servidor).
    type Payload: Serialize + Send + Sync;

    fn id(&self) -> i64;

    /// Troca o id de um registro local que colidiu com um id do servidor.
    fn set_id(&mut self, id: i64);

    /// Próximo id livre para um registro sintetizado localmente.
    fn next_local_id(existing: &[Self]) -> i64;

    /// `term` já chega aparado, em minúsculas e não vazio.
    fn matches_search(&self, term: &str) -> bool;

    /// `filter` nunca é `"all"` nem vazio aqui.
    fn matches_filter(&self, filter: &str) -> bool;

    /// Registro sintetizado quando o POST falha.
    fn offline_create(payload: &Self::Payload, existing: &[Self]) -> Self;

    /// Substituto sintetizado quando o PUT falha.
    fn offline_update(id: i64, payload: &Self::Payload, previous: Option<&Self>) -> Self;
}

// Estado da busca/filtro/página de uma tabela
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: String,
    pub filter: String,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: FILTER_ALL.to_string(),
            page: 1,
        }
    }
}

/// Parâmetros de query aceitos pelas rotas de listagem.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Texto livre (nome, e-mail, telefone ou permissão).
    pub search: Option<String>,
    /// Filtro categórico: tipo (clientes) ou guarda (cargos). `all` desliga.
    #[serde(alias = "type", alias = "guard")]
    pub filter: Option<String>,
    pub page: Option<usize>,
}

/// A "fatia" visível de uma tabela.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_filtered: usize,
    pub total_records: usize,
    pub search: String,
    pub filter: String,
    /// Ids nesta página que ainda não foram confirmados pelo backend.
    pub pending_ids: Vec<i64>,
}

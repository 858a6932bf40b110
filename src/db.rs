pub mod remote_repo;
pub use remote_repo::{CollectionRepository, RemoteCollection};
pub mod rbac_repo;
pub use rbac_repo::{PermissionCatalogRepository, RemotePermissionCatalog};

#[cfg(test)]
pub(crate) mod fake_repo;

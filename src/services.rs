pub mod sync;
pub mod listing;
pub mod collection_service;
pub mod crm_service;
pub use crm_service::CustomerListController;
pub mod rbac_service;
pub use rbac_service::RoleListController;

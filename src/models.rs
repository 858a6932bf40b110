pub mod listing;
pub mod form;
pub mod crm;
pub mod rbac;

pub mod common;
pub mod customers;
pub mod roles;

//! Database access layer - MySQL via sqlx

pub mod mysql;

pub use mysql::MySqlUserStore;

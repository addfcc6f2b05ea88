//! MySQL implementations of the core storage ports

pub mod user_store_impl;

pub use user_store_impl::MySqlUserStore;

//! Request handling support - error translation to HTTP

pub mod error;

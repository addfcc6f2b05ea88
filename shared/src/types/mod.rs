//! Common wire-level types

pub mod response;

pub use response::{error_codes, ErrorResponse};

//! Error handling for the authgate backend.

pub mod error_code;

pub use error_code::ErrorCode;

//! # Clubroster Shared Library
//!
//! This crate contains the document models and store access layer shared by
//! the clubroster API server.
//!
//! ## Module Organization
//!
//! - `models`: Document models (users, clubs) and their store operations
//! - `db`: MongoDB store handle with explicit lifecycle

pub mod db;
pub mod models;

/// Current version of the clubroster shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

//! # JotDB Testkit
//!
//! Test utilities for JotDB.
//!
//! This crate provides:
//! - Test fixtures and database helpers
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use jotdb_testkit::prelude::*;
//! use serde_json::json;
//!
//! with_temp_db(|db| {
//!     let users = db.collect("users", user_schema().into());
//!     let doc = users.create(json!({"name": "ada", "age": 36})).unwrap();
//!     users.save(&doc).unwrap();
//!     assert_eq!(users.count(), 1);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;

//! Dataunits - dependency graph engine for Data Units.
//!
//! A Data Unit is a named query specification whose filters may take their
//! values from another Data Unit's fields. This crate validates those
//! references, detects circular dependencies and computes the order in which
//! the units can run.
//!
//! ```
//! use dataunits::domain::{DataUnit, FilterCondition};
//! use dataunits::graph::get_execution_order;
//!
//! let units = vec![
//!     DataUnit::new("Accounts", "Account").with_fields(["Id"]),
//!     DataUnit::new("Contacts", "Contact")
//!         .with_fields(["Id", "AccountId"])
//!         .with_filter(FilterCondition::referencing("AccountId", "=", "Accounts", "Id")),
//! ];
//!
//! assert_eq!(get_execution_order(&units).unwrap(), vec!["Accounts", "Contacts"]);
//! ```

#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod snapshot;
pub mod validation;

// Public CLI module (needed by binary)
pub mod cli;

pub(crate) mod output;

pub use engine::Engine;
pub use error::{Error, Result};

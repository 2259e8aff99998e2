//! Error types for Data Unit graph operations.
//!
//! Validation failures (`ReferenceTargetMissing`, `ReferenceFieldMissing`,
//! `DuplicateDeveloperName`, `InvalidFilterLogic`) and `CircularDependency`
//! describe the first problem found in a snapshot. There is never a partial
//! result: callers either get a full execution order or one of these.

use std::io;
use thiserror::Error;

/// The error type for Data Unit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A filter reference names a Data Unit that is not in the snapshot.
    #[error("Data unit '{unit}' references data unit '{target}', which does not exist")]
    ReferenceTargetMissing {
        /// Referencing unit (`parent.relationship` for child units)
        unit: String,
        /// Developer name that could not be resolved
        target: String,
    },

    /// A filter reference names a field the target unit does not select.
    #[error(
        "Data unit '{unit}' references field '{field}' on data unit '{target}', but '{target}' does not select that field"
    )]
    ReferenceFieldMissing {
        /// Referencing unit (`parent.relationship` for child units)
        unit: String,
        /// Developer name of the referenced unit
        target: String,
        /// Field path missing from the target's field list
        field: String,
    },

    /// The reference graph contains a cycle.
    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency {
        /// Witness path, ending in the repeated unit
        path: Vec<String>,
    },

    /// Two units in the snapshot share a developer name.
    #[error("Duplicate data unit developer name: '{developer_name}'")]
    DuplicateDeveloperName {
        /// The repeated developer name
        developer_name: String,
    },

    /// A filter-logic expression does not match its conditions.
    #[error("Invalid filter logic on data unit '{unit}': {message}")]
    InvalidFilterLogic {
        /// Unit owning the expression (`parent.relationship` for child units)
        unit: String,
        /// What is wrong with the expression
        message: String,
    },

    /// A lookup named a unit that is not in the graph.
    #[error("Data unit not found: {0}")]
    UnitNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A snapshot file could not be parsed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for Data Unit operations.
pub type Result<T> = std::result::Result<T, Error>;

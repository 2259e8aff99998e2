//! Configured entry point for the editor.
//!
//! [`Engine`] holds only its options. Each call receives the current snapshot
//! and builds its own graph, the same as the free functions in
//! [`crate::graph`].

use crate::config::EngineConfig;
use crate::domain::DataUnit;
use crate::error::{Error, Result};
use crate::graph::{build_dependency_graph, detect_cycle, topological_order, DependencyNode};
use crate::validation::{validate_filter_logic, validate_references};

/// Stateless dependency engine with configurable checks.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given options.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The options this engine applies.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a snapshot: references first, then filter logic if enabled.
    ///
    /// # Errors
    ///
    /// The first validation failure.
    pub fn validate(&self, units: &[DataUnit]) -> Result<()> {
        validate_references(units)?;
        if self.config.check_filter_logic {
            validate_filter_logic(units)?;
        }
        Ok(())
    }

    /// Build the dependency graph, collapsing repeated edges if configured.
    pub fn graph(&self, units: &[DataUnit]) -> Vec<DependencyNode> {
        let mut graph = build_dependency_graph(units);
        if self.config.dedupe_dependencies {
            for node in &mut graph {
                dedupe_in_order(&mut node.dependencies);
            }
        }
        graph
    }

    /// Validate, reject cycles and return the execution order.
    ///
    /// # Errors
    ///
    /// The first validation failure, or [`Error::CircularDependency`].
    pub fn execution_order(&self, units: &[DataUnit]) -> Result<Vec<String>> {
        self.validate(units)?;

        let mut graph = self.graph(units);
        if let Some(path) = detect_cycle(&mut graph) {
            tracing::info!(
                cycle = %path.join(" -> "),
                "Rejected snapshot with circular dependency"
            );
            return Err(Error::CircularDependency { path });
        }

        topological_order(&graph)
    }
}

fn dedupe_in_order(names: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::with_capacity(names.len());
    names.retain(|name| seen.insert(name.clone()));
}

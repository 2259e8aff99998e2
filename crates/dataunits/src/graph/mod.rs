//! Dependency graph construction and execution ordering.
//!
//! Edges point from **dependent -> dependency**: a unit whose filter (or
//! whose child unit's filter) references another unit depends on it, and the
//! referenced unit must run first.
//!
//! Every entry point takes the snapshot explicitly and builds a fresh node
//! set, so repeated calls never observe each other's traversal state.

mod cycles;
mod order;

pub use cycles::detect_cycle;
pub use order::topological_order;

use std::collections::HashMap;

use crate::domain::DataUnit;
use crate::error::{Error, Result};
use crate::validation::validate_references;

/// A per-computation graph node for one Data Unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    /// Developer name of the unit this node stands for
    pub developer_name: String,

    /// Developer names this unit depends on, in discovery order
    pub dependencies: Vec<String>,

    /// Fully resolved by a traversal
    pub visited: bool,

    /// On the current traversal path
    pub temp: bool,
}

impl DependencyNode {
    /// Create an unvisited node.
    pub fn new(developer_name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            developer_name: developer_name.into(),
            dependencies,
            visited: false,
            temp: false,
        }
    }

    /// Clear both traversal flags.
    pub fn reset(&mut self) {
        self.visited = false;
        self.temp = false;
    }
}

/// Collect the developer names a unit depends on.
///
/// Scans the unit's own filters, then every child unit's filters. Duplicates
/// are kept; they are harmless to the traversals.
pub fn extract_references(unit: &DataUnit) -> Vec<String> {
    unit.references().map(|r| r.data_unit.clone()).collect()
}

/// Build one node per unit, in input order.
pub fn build_dependency_graph(units: &[DataUnit]) -> Vec<DependencyNode> {
    let graph: Vec<DependencyNode> = units
        .iter()
        .map(|unit| DependencyNode::new(unit.developer_name.clone(), extract_references(unit)))
        .collect();

    tracing::debug!(
        unit_count = graph.len(),
        edge_count = graph.iter().map(|n| n.dependencies.len()).sum::<usize>(),
        "Built dependency graph"
    );

    graph
}

/// Compute the order in which the units can run.
///
/// Validates references, builds the graph, rejects cycles and returns a
/// dependencies-first order containing every unit exactly once. Independent
/// units keep their input order.
///
/// # Errors
///
/// Returns the first validation failure, or [`Error::CircularDependency`]
/// with a witness path.
pub fn get_execution_order(units: &[DataUnit]) -> Result<Vec<String>> {
    validate_references(units)?;

    let mut graph = build_dependency_graph(units);
    if let Some(path) = detect_cycle(&mut graph) {
        return Err(Error::CircularDependency { path });
    }

    topological_order(&graph)
}

/// Map each developer name to its position. The first occurrence wins.
pub(crate) fn node_positions(graph: &[DependencyNode]) -> HashMap<&str, usize> {
    let mut positions = HashMap::with_capacity(graph.len());
    for (idx, node) in graph.iter().enumerate() {
        positions.entry(node.developer_name.as_str()).or_insert(idx);
    }
    positions
}

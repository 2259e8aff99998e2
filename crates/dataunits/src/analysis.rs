//! What-if queries over a validated snapshot using petgraph.
//!
//! The editor uses these to answer questions before a change is made:
//! - which units a unit transitively reads from
//! - which units must be re-run when a unit changes
//! - whether a new reference would close a cycle

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::domain::DataUnit;
use crate::error::{Error, Result};
use crate::validation::validate_references;

/// Read-only dependency index over one snapshot.
///
/// Edges point from dependent -> dependency, parallel references collapse
/// into one edge.
#[derive(Debug, Clone)]
pub struct DependencyIndex {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyIndex {
    /// Validate the snapshot and index its references.
    ///
    /// Cycles are allowed here; use [`crate::graph::get_execution_order`] to
    /// reject them.
    ///
    /// # Errors
    ///
    /// Any error from [`validate_references`].
    pub fn build(units: &[DataUnit]) -> Result<Self> {
        validate_references(units)?;

        let mut graph = DiGraph::with_capacity(units.len(), 0);
        let mut node_map = HashMap::with_capacity(units.len());
        for unit in units {
            let idx = graph.add_node(unit.developer_name.clone());
            node_map.insert(unit.developer_name.clone(), idx);
        }

        for unit in units {
            let from = node_map[&unit.developer_name];
            for reference in unit.references() {
                let to = node_map[&reference.data_unit];
                graph.update_edge(from, to, ());
            }
        }

        tracing::debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "Built dependency index"
        );

        Ok(Self { graph, node_map })
    }

    /// Number of indexed units.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the index holds no units.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Units `name` depends on, directly or transitively, with their depth.
    ///
    /// Sorted by depth, then name. `max_depth` limits the traversal.
    ///
    /// # Errors
    ///
    /// [`Error::UnitNotFound`] if `name` is not indexed.
    pub fn dependencies_of(
        &self,
        name: &str,
        max_depth: Option<usize>,
    ) -> Result<Vec<(String, usize)>> {
        self.traverse(name, Direction::Outgoing, max_depth)
    }

    /// Units that depend on `name`, directly or transitively, with their depth.
    ///
    /// These are the units to re-run when `name` changes.
    ///
    /// # Errors
    ///
    /// [`Error::UnitNotFound`] if `name` is not indexed.
    pub fn dependents_of(
        &self,
        name: &str,
        max_depth: Option<usize>,
    ) -> Result<Vec<(String, usize)>> {
        self.traverse(name, Direction::Incoming, max_depth)
    }

    /// Whether adding a reference from `from` to `to` would create a cycle.
    ///
    /// True when `to` already reaches `from`, or when both are the same unit.
    ///
    /// # Errors
    ///
    /// [`Error::UnitNotFound`] if either unit is not indexed.
    pub fn would_create_cycle(&self, from: &str, to: &str) -> Result<bool> {
        let from_node = self.node(from)?;
        let to_node = self.node(to)?;

        if from_node == to_node {
            return Ok(true);
        }
        Ok(algo::has_path_connecting(&self.graph, to_node, from_node, None))
    }

    fn node(&self, name: &str) -> Result<NodeIndex> {
        self.node_map
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnitNotFound(name.to_string()))
    }

    fn traverse(
        &self,
        name: &str,
        direction: Direction,
        max_depth: Option<usize>,
    ) -> Result<Vec<(String, usize)>> {
        let start = self.node(name)?;

        let mut result = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for next in self.graph.neighbors_directed(current, direction) {
                if visited.insert(next) {
                    result.push((self.graph[next].clone(), depth + 1));
                    queue.push_back((next, depth + 1));
                }
            }
        }

        result.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(result)
    }
}

//! Topological ordering of an acyclic dependency graph.

use std::collections::HashMap;

use super::{node_positions, DependencyNode};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order the nodes so every node comes after everything it depends on.
///
/// DFS postorder with roots in input order and dependencies in discovery
/// order, so the result is deterministic. Each node appears exactly once.
///
/// Traversal state is kept locally; the nodes' own flags are not touched.
///
/// # Errors
///
/// The graph must already be known to be acyclic (see [`super::detect_cycle`]).
/// If a cycle is met anyway, [`Error::CircularDependency`] is returned rather
/// than an invalid order.
pub fn topological_order(graph: &[DependencyNode]) -> Result<Vec<String>> {
    let positions = node_positions(graph);
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut stack = Vec::new();
    let mut order = Vec::with_capacity(graph.len());

    for root in 0..graph.len() {
        visit(root, graph, &positions, &mut marks, &mut stack, &mut order)?;
    }

    tracing::debug!(unit_count = order.len(), "Computed execution order");
    Ok(order)
}

fn visit(
    node: usize,
    graph: &[DependencyNode],
    positions: &HashMap<&str, usize>,
    marks: &mut [Mark],
    stack: &mut Vec<usize>,
    order: &mut Vec<String>,
) -> Result<()> {
    match marks[node] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            // Same witness shape as detect_cycle: from the walk's root.
            let mut path: Vec<String> = stack
                .iter()
                .map(|&n| graph[n].developer_name.clone())
                .collect();
            path.push(graph[node].developer_name.clone());
            return Err(Error::CircularDependency { path });
        }
        Mark::Unvisited => {}
    }

    marks[node] = Mark::InProgress;
    stack.push(node);

    for dependency in &graph[node].dependencies {
        if let Some(&next) = positions.get(dependency.as_str()) {
            visit(next, graph, positions, marks, stack, order)?;
        }
    }

    stack.pop();
    marks[node] = Mark::Done;
    order.push(graph[node].developer_name.clone());
    Ok(())
}

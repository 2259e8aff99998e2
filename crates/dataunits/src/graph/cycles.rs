//! Circular dependency detection.

use std::collections::HashMap;

use super::{node_positions, DependencyNode};

/// Find a circular dependency, returning a witness path if there is one.
///
/// Depth-first search with three-color marking: `temp` marks nodes on the
/// current path, `visited` marks nodes from which no cycle is reachable.
/// Roots are tried in input order and dependencies in discovery order, so the
/// reported cycle is stable for a given input.
///
/// The witness runs from the root of the failing walk to the repeated node,
/// e.g. `["A", "B", "A"]`. Dependencies naming no node are skipped.
///
/// Both flags are reset on entry.
pub fn detect_cycle(graph: &mut [DependencyNode]) -> Option<Vec<String>> {
    graph.iter_mut().for_each(DependencyNode::reset);

    let positions: HashMap<String, usize> = node_positions(graph)
        .into_iter()
        .map(|(name, idx)| (name.to_string(), idx))
        .collect();

    let mut path = Vec::new();
    for root in 0..graph.len() {
        if graph[root].visited {
            continue;
        }
        if let Some(cycle) = visit(root, graph, &positions, &mut path) {
            tracing::debug!(
                cycle_length = cycle.len(),
                root = %graph[root].developer_name,
                "Circular dependency found"
            );
            return Some(cycle);
        }
    }

    tracing::debug!(node_count = graph.len(), "No circular dependency found");
    None
}

fn visit(
    node: usize,
    graph: &mut [DependencyNode],
    positions: &HashMap<String, usize>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    if graph[node].temp {
        let mut witness = path.clone();
        witness.push(graph[node].developer_name.clone());
        return Some(witness);
    }
    if graph[node].visited {
        return None;
    }

    graph[node].temp = true;
    path.push(graph[node].developer_name.clone());

    let dependencies = graph[node].dependencies.clone();
    for dependency in &dependencies {
        let Some(&next) = positions.get(dependency) else {
            continue;
        };
        if let Some(cycle) = visit(next, graph, positions, path) {
            return Some(cycle);
        }
    }

    path.pop();
    graph[node].temp = false;
    graph[node].visited = true;
    None
}

//! Command execution logic.

use anyhow::Result;
use serde_json::json;

use super::args::{CheckEdgeArgs, SnapshotArgs, TraverseArgs};
use crate::analysis::DependencyIndex;
use crate::engine::Engine;
use crate::output::{self, OutputConfig};
use crate::snapshot::load_snapshot;

/// Execute the order command
pub async fn order(
    engine: &Engine,
    args: &SnapshotArgs,
    json: bool,
    out: OutputConfig,
) -> Result<()> {
    let units = load_snapshot(&args.snapshot).await?;
    let order = engine.execution_order(&units)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    if order.is_empty() {
        println!("{}", output::muted("Snapshot contains no data units.", out));
        return Ok(());
    }

    let width = order.len().to_string().len();
    for (position, name) in order.iter().enumerate() {
        let label = format!("{:>width$}.", position + 1);
        println!("{} {}", output::muted(&label, out), output::unit(name, out));
    }
    Ok(())
}

/// Execute the validate command
pub async fn validate(
    engine: &Engine,
    args: &SnapshotArgs,
    json: bool,
    out: OutputConfig,
) -> Result<()> {
    let units = load_snapshot(&args.snapshot).await?;
    engine.execution_order(&units)?;

    if json {
        println!("{}", json!({ "valid": true, "unitCount": units.len() }));
    } else {
        println!(
            "{} {} data units, no circular dependencies",
            output::success(output::check_icon(out), out),
            units.len()
        );
    }
    Ok(())
}

/// Execute the deps or dependents command
pub async fn traverse(
    args: &TraverseArgs,
    dependents: bool,
    json: bool,
    out: OutputConfig,
) -> Result<()> {
    let units = load_snapshot(&args.snapshot).await?;
    let index = DependencyIndex::build(&units)?;

    let found = if dependents {
        index.dependents_of(&args.unit, args.depth)?
    } else {
        index.dependencies_of(&args.unit, args.depth)?
    };

    if json {
        let entries: Vec<_> = found
            .iter()
            .map(|(name, depth)| json!({ "developerName": name, "depth": depth }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let relation = if dependents { "dependents" } else { "dependencies" };
    if found.is_empty() {
        println!(
            "{}",
            output::muted(&format!("{} has no {relation}.", args.unit), out)
        );
        return Ok(());
    }

    println!("{} {}:", output::unit(&args.unit, out), relation);
    for (name, depth) in &found {
        let indent = "  ".repeat(*depth);
        println!(
            "{indent}{} {}",
            output::muted(output::bullet_icon(out), out),
            output::unit(name, out)
        );
    }
    Ok(())
}

/// Execute the check-edge command
pub async fn check_edge(args: &CheckEdgeArgs, json: bool, out: OutputConfig) -> Result<()> {
    let units = load_snapshot(&args.snapshot).await?;
    let index = DependencyIndex::build(&units)?;
    let cycle = index.would_create_cycle(&args.from, &args.to)?;

    if json {
        println!(
            "{}",
            json!({ "from": args.from, "to": args.to, "createsCycle": cycle })
        );
    } else if cycle {
        println!(
            "{} {} {} {} would create a circular dependency",
            output::error(output::cross_icon(out), out),
            output::unit(&args.from, out),
            output::muted("->", out),
            output::unit(&args.to, out)
        );
    } else {
        println!(
            "{} {} {} {} is safe",
            output::success(output::check_icon(out), out),
            output::unit(&args.from, out),
            output::muted("->", out),
            output::unit(&args.to, out)
        );
    }
    Ok(())
}

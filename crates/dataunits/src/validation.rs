//! Snapshot validation.
//!
//! Reference validation is the gate in front of graph work: every filter
//! reference must name a unit in the snapshot and a field that unit selects.
//! Developer names must be unique, since they are the graph's node keys.
//!
//! Filter-logic checks are separate and opt-in (see [`crate::engine::Engine`]).

use std::collections::{HashMap, HashSet};

use crate::domain::{DataUnit, FilterCondition};
use crate::error::{Error, Result};

/// Reject duplicate developer names.
///
/// # Errors
///
/// [`Error::DuplicateDeveloperName`] for the first name seen twice.
pub fn check_unique_names(units: &[DataUnit]) -> Result<()> {
    let mut seen = HashSet::with_capacity(units.len());
    for unit in units {
        if !seen.insert(unit.developer_name.as_str()) {
            return Err(Error::DuplicateDeveloperName {
                developer_name: unit.developer_name.clone(),
            });
        }
    }
    Ok(())
}

/// Validate that every filter reference resolves.
///
/// Units are checked in input order; within a unit, its own filters come
/// before its child units' filters. The first failure is returned.
///
/// # Errors
///
/// - [`Error::DuplicateDeveloperName`] if two units share a key
/// - [`Error::ReferenceTargetMissing`] if a reference names an unknown unit
/// - [`Error::ReferenceFieldMissing`] if the referenced unit lacks the field
pub fn validate_references(units: &[DataUnit]) -> Result<()> {
    check_unique_names(units)?;

    let by_name: HashMap<&str, &DataUnit> = units
        .iter()
        .map(|u| (u.developer_name.as_str(), u))
        .collect();

    for unit in units {
        check_conditions(&unit.developer_name, &unit.filters, &by_name)?;
        for child in &unit.child_units {
            check_conditions(&child.label(&unit.developer_name), &child.filters, &by_name)?;
        }
    }

    tracing::debug!(unit_count = units.len(), "References validated");
    Ok(())
}

fn check_conditions(
    label: &str,
    conditions: &[FilterCondition],
    by_name: &HashMap<&str, &DataUnit>,
) -> Result<()> {
    for reference in conditions.iter().filter_map(FilterCondition::reference_target) {
        let target = by_name.get(reference.data_unit.as_str()).ok_or_else(|| {
            Error::ReferenceTargetMissing {
                unit: label.to_string(),
                target: reference.data_unit.clone(),
            }
        })?;

        if !target.has_field(&reference.field) {
            return Err(Error::ReferenceFieldMissing {
                unit: label.to_string(),
                target: reference.data_unit.clone(),
                field: reference.field.clone(),
            });
        }
    }
    Ok(())
}

/// Check the filter logic of every unit and child unit in the snapshot.
///
/// # Errors
///
/// [`Error::InvalidFilterLogic`] for the first malformed expression.
pub fn validate_filter_logic(units: &[DataUnit]) -> Result<()> {
    for unit in units {
        if let Some(logic) = &unit.filter_logic {
            check_filter_logic(&unit.developer_name, logic, unit.filters.len())?;
        }
        for child in &unit.child_units {
            if let Some(logic) = &child.filter_logic {
                check_filter_logic(&child.label(&unit.developer_name), logic, child.filters.len())?;
            }
        }
    }
    Ok(())
}

/// Check a filter-logic expression against its condition count.
///
/// Accepts 1-based condition indices, `AND`, `OR`, `NOT` (any case) and
/// parentheses. Indices must be in range and parentheses must balance. A
/// blank expression is treated as absent.
///
/// # Errors
///
/// [`Error::InvalidFilterLogic`] naming `unit` and the problem.
pub fn check_filter_logic(unit: &str, logic: &str, condition_count: usize) -> Result<()> {
    let invalid = |message: String| Error::InvalidFilterLogic {
        unit: unit.to_string(),
        message,
    };

    let mut depth: usize = 0;
    let mut chars = logic.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            depth += 1;
            chars.next();
        } else if c == ')' {
            depth = depth
                .checked_sub(1)
                .ok_or_else(|| invalid("unmatched ')'".to_string()))?;
            chars.next();
        } else if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                digits.push(d);
                chars.next();
            }
            let index: usize = digits
                .parse()
                .map_err(|_| invalid(format!("condition index '{digits}' is too large")))?;
            if index == 0 || index > condition_count {
                return Err(invalid(format!(
                    "condition {index} does not exist ({condition_count} conditions defined)"
                )));
            }
        } else if c.is_ascii_alphabetic() {
            let mut word = String::new();
            while let Some(&w) = chars.peek().filter(|w| w.is_ascii_alphabetic()) {
                word.push(w);
                chars.next();
            }
            if !matches!(word.to_ascii_uppercase().as_str(), "AND" | "OR" | "NOT") {
                return Err(invalid(format!("unknown operator '{word}'")));
            }
        } else {
            return Err(invalid(format!("unexpected character '{c}'")));
        }
    }

    if depth > 0 {
        return Err(invalid("unclosed '('".to_string()));
    }
    Ok(())
}

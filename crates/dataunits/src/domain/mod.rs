//! Domain types for Data Units.
//!
//! A Data Unit is a named, reusable query specification over one object. Its
//! filter conditions may take their value from a field of another Data Unit,
//! which is what makes the collection a dependency graph.
//!
//! The serialized form matches what the editing UI produces (camelCase keys).

use serde::{Deserialize, Serialize};

/// A named, reusable query specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUnit {
    /// Display label
    #[serde(default)]
    pub name: String,

    /// Unique identifier, used as the graph node key
    pub developer_name: String,

    /// Target object (opaque to the engine)
    #[serde(default)]
    pub object: String,

    /// Selected field paths
    #[serde(default)]
    pub fields: Vec<String>,

    /// Filter conditions
    #[serde(default)]
    pub filters: Vec<FilterCondition>,

    /// Boolean expression over 1-based condition indices, e.g. `(1 AND 2) OR 3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_logic: Option<String>,

    /// Parent-to-child relationship sub-queries
    #[serde(default)]
    pub child_units: Vec<ChildUnit>,
}

/// A relationship sub-query nested one level under a [`DataUnit`].
///
/// Child units are not graph nodes. Their filter references count as edges
/// from the parent unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildUnit {
    /// Child relationship name on the parent object
    pub relationship_name: String,

    /// Selected field paths
    #[serde(default)]
    pub fields: Vec<String>,

    /// Filter conditions
    #[serde(default)]
    pub filters: Vec<FilterCondition>,

    /// Boolean expression over 1-based condition indices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_logic: Option<String>,
}

/// One comparison clause of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Field path being filtered
    pub field: String,

    /// Comparison operator token (opaque to the engine)
    #[serde(default)]
    pub operator: String,

    /// Literal comparison value
    #[serde(default)]
    pub value: String,

    /// Whether the value is a literal or comes from another unit
    #[serde(default)]
    pub value_type: ValueType,

    /// Cross-unit reference, meaningful only for [`ValueType::Reference`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

/// Discriminator for a filter condition's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Literal value
    #[default]
    Static,

    /// Value computed from another Data Unit's field
    Reference,
}

/// A pointer to a field of another Data Unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Developer name of the referenced unit
    pub data_unit: String,

    /// Field path on the referenced unit
    pub field: String,
}

impl DataUnit {
    /// Create an empty unit. The display name defaults to the developer name.
    pub fn new(developer_name: impl Into<String>, object: impl Into<String>) -> Self {
        let developer_name = developer_name.into();
        Self {
            name: developer_name.clone(),
            developer_name,
            object: object.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            filter_logic: None,
            child_units: Vec::new(),
        }
    }

    /// Replace the selected fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a filter condition.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the filter-logic expression.
    #[must_use]
    pub fn with_filter_logic(mut self, logic: impl Into<String>) -> Self {
        self.filter_logic = Some(logic.into());
        self
    }

    /// Append a child unit.
    #[must_use]
    pub fn with_child(mut self, child: ChildUnit) -> Self {
        self.child_units.push(child);
        self
    }

    /// Whether `field` is among the selected fields.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// All cross-unit references of this unit: its own filters first, then
    /// each child unit's filters, in declaration order.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.filters
            .iter()
            .chain(self.child_units.iter().flat_map(|c| c.filters.iter()))
            .filter_map(FilterCondition::reference_target)
    }
}

impl ChildUnit {
    /// Create an empty child unit for the given relationship.
    pub fn new(relationship_name: impl Into<String>) -> Self {
        Self {
            relationship_name: relationship_name.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            filter_logic: None,
        }
    }

    /// Replace the selected fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a filter condition.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.filters.push(filter);
        self
    }

    /// Label used in error messages: `parent.relationship`.
    pub fn label(&self, parent: &str) -> String {
        format!("{parent}.{}", self.relationship_name)
    }
}

impl FilterCondition {
    /// A condition comparing against a literal value.
    pub fn static_value(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
            value_type: ValueType::Static,
            reference: None,
        }
    }

    /// A condition whose value comes from `data_unit.field`.
    pub fn referencing(
        field: impl Into<String>,
        operator: impl Into<String>,
        data_unit: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: String::new(),
            value_type: ValueType::Reference,
            reference: Some(Reference {
                data_unit: data_unit.into(),
                field: target_field.into(),
            }),
        }
    }

    /// The reference this condition depends on, if it is a reference condition.
    ///
    /// A condition tagged `reference` without a reference payload yields `None`.
    pub fn reference_target(&self) -> Option<&Reference> {
        match self.value_type {
            ValueType::Reference => self.reference.as_ref(),
            ValueType::Static => None,
        }
    }
}

//! Variable registry: named definitions mapping to filter constraints or
//! formulas.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::FieldValue;

/// A variable definition: a set of filter constraints, optionally a formula
/// over other registry variables, and a drop flag.
///
/// A definition without a formula is *direct*: the variable is located by
/// filtering the table. A definition with a formula is *derived*: the
/// variable is computed from the formula's components, each resolved
/// recursively. A `None` constraint value means "no constraint on this
/// column"; the `description` column constrains by substring containment
/// rather than equality.
///
/// # Example
///
/// ```
/// use comptanat::VariableDef;
///
/// let direct = VariableDef::new().code("D41").institution("S2").ressources(false);
/// assert!(direct.formula.is_none());
///
/// let derived = VariableDef::new().formula("Interets + Dividendes");
/// assert!(derived.formula.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    /// Algebraic formula over other registry variables, if derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Resolve the variable (so dependents can use it) but keep it out of
    /// combined results.
    #[serde(default)]
    pub drop: bool,

    /// Constraints by column name. Applied in sorted key order.
    #[serde(flatten)]
    constraints: BTreeMap<String, Option<FieldValue>>,
}

impl VariableDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the `code` column.
    pub fn code(self, code: impl Into<String>) -> Self {
        self.constraint("code", FieldValue::Text(code.into()))
    }

    /// Constrain the `institution` column.
    pub fn institution(self, institution: impl Into<String>) -> Self {
        self.constraint("institution", FieldValue::Text(institution.into()))
    }

    /// Constrain the `ressources` flag.
    pub fn ressources(self, ressources: bool) -> Self {
        self.constraint("ressources", FieldValue::Flag(ressources))
    }

    /// Constrain the `year` column.
    pub fn year(self, year: i32) -> Self {
        self.constraint("year", FieldValue::Year(year))
    }

    /// Constrain the `description` column by substring containment.
    pub fn description(self, description: impl Into<String>) -> Self {
        self.constraint("description", FieldValue::Text(description.into()))
    }

    /// Constrain an arbitrary column by equality. Columns outside the table
    /// schema surface as a filter error at lookup time.
    pub fn constraint(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.constraints.insert(column.into(), Some(value.into()));
        self
    }

    /// Record an explicitly disabled constraint for `column`.
    pub fn unconstrained(mut self, column: impl Into<String>) -> Self {
        self.constraints.insert(column.into(), None);
        self
    }

    /// Attach a formula, making this a derived definition.
    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Set the drop flag.
    pub fn dropped(mut self, dropped: bool) -> Self {
        self.drop = dropped;
        self
    }

    /// Constraints in sorted column order.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.constraints
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_ref()))
    }
}

/// An insertion-ordered mapping from variable name to definition.
///
/// The registry keeps a name vector alongside the definition map so that
/// batch resolution visits variables, and appends result columns, in the
/// order definitions were inserted.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    /// Variable names in insertion order.
    order: Vec<String>,
    /// Definitions indexed by name.
    defs: HashMap<String, VariableDef>,
}

impl VariableRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. Replacing an existing name keeps its original
    /// position in the iteration order.
    pub fn insert(&mut self, name: impl Into<String>, def: VariableDef) {
        let name = name.into();
        if !self.defs.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.defs.insert(name, def);
    }

    /// Get a definition by name.
    pub fn get(&self, name: &str) -> Option<&VariableDef> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Variable names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(name, definition)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableDef)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), &self.defs[name]))
    }
}

impl FromIterator<(String, VariableDef)> for VariableRegistry {
    fn from_iter<I: IntoIterator<Item = (String, VariableDef)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, def) in iter {
            registry.insert(name, def);
        }
        registry
    }
}

impl Serialize for VariableRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (name, def) in self.iter() {
            map.serialize_entry(name, def)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VariableRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = VariableRegistry;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of variable definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut registry = VariableRegistry::new();
                while let Some((name, def)) = access.next_entry::<String, VariableDef>()? {
                    registry.insert(name, def);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

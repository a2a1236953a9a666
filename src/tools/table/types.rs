use crate::error::{Result, WibbleError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// One entry of a [`List`]: an optional name and a vector of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Option<String>,
    pub values: Vec<Value>,
}

impl Field {
    pub fn named(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    pub fn unnamed(values: Vec<Value>) -> Self {
        Self { name: None, values }
    }
}

/// Ordered, optionally named collection of value vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List(pub Vec<Field>);

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.0.push(Field::named(name, values));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a list from JSON.
    ///
    /// An object gives named fields in key order, an array gives unnamed
    /// fields. Within either, an array is a vector and any other value is a
    /// one-element vector.
    pub fn from_json(value: Value) -> Result<Self> {
        let fields = match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, v)| Field::named(name, into_values(v)))
                .collect(),
            Value::Array(items) => items
                .into_iter()
                .map(|v| Field::unnamed(into_values(v)))
                .collect(),
            other => {
                return Err(WibbleError::InvalidList(format!(
                    "expected a JSON object or array, got {}",
                    type_name(&other)
                )))
            }
        };
        Ok(Self(fields))
    }

    /// Fields with their resolved column names.
    ///
    /// An unnamed field at 1-based position `n` becomes `V{offset + n}`, so
    /// fields merged into a table with `offset` columns land after them.
    pub(super) fn resolved(self, offset: usize) -> impl Iterator<Item = (String, Vec<Value>)> {
        self.0.into_iter().enumerate().map(move |(idx, field)| {
            let name = field
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("V{}", offset + idx + 1));
            (name, field.values)
        })
    }
}

fn into_values(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        scalar => vec![scalar],
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Named columns of equal length.
///
/// Only built through [`lst_tbl`](super::lst_tbl) and
/// [`add_data`](super::add_data), which enforce the length and name rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub(super) columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nrow(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.position(name).map(|idx| self.columns[idx].values.as_slice())
    }

    pub(super) fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Row-oriented view: one JSON object per row, keys in column order.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        (0..self.nrow())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[row].clone()))
                    .collect()
            })
            .collect()
    }
}

/// Serialized column-oriented: `{"name": [values...], ...}`.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.values)?;
        }
        map.end()
    }
}

//! In-memory tabular data.
//!
//! Validation operates column-wise, so tables are stored as named columns
//! of [`CellValue`]s rather than rows.

use crate::error::{Result, ValidatorError};
use serde_json::Value;

/// A single cell in a column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl CellValue {
    /// Returns true if this cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this cell.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::String(_) => "string",
            CellValue::Int(_) => "int64",
            CellValue::Float(_) => "float64",
            CellValue::Bool(_) => "boolean",
        }
    }

    /// Attempts to read this cell as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to read this cell as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// String key used for duplicate detection and set membership.
    pub fn as_key(&self) -> String {
        match self {
            CellValue::Null => "NULL".to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    /// Creates a column.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all cells.
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of null cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Iterates over non-null cells.
    pub fn non_null(&self) -> impl Iterator<Item = &CellValue> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Returns the declared type of the column.
    ///
    /// All non-null cells of one type give that type; a mix of integers and
    /// floats widens to `float64`; any other mix is `mixed`; an all-null
    /// column is `null`.
    pub fn dtype(&self) -> &'static str {
        let mut dtype: Option<&'static str> = None;
        for value in self.non_null() {
            let t = value.type_name();
            dtype = match dtype {
                None => Some(t),
                Some(current) if current == t => Some(current),
                Some("int64") if t == "float64" => Some("float64"),
                Some("float64") if t == "int64" => Some("float64"),
                Some(_) => return "mixed",
            };
        }
        dtype.unwrap_or("null")
    }
}

/// A collection of named columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from columns.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns all columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of rows (the longest column's length).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// Parses a table from a JSON object mapping column names to arrays of
    /// scalar cells, e.g. `{"age": [31, 45, null]}`.
    pub fn from_json_str(json: &str) -> Result<Table> {
        let value: Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| ValidatorError::InvalidTable("expected a JSON object".to_string()))?;

        let mut columns = Vec::new();
        for (name, cells) in object {
            let items = cells.as_array().ok_or_else(|| {
                ValidatorError::InvalidTable(format!("column '{}' is not an array", name))
            })?;
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(cell_from_json(name, item)?);
            }
            columns.push(Column::new(name.clone(), values));
        }
        Ok(Table::from_columns(columns))
    }
}

fn cell_from_json(column: &str, value: &Value) -> Result<CellValue> {
    match value {
        Value::Null => Ok(CellValue::Null),
        Value::Bool(b) => Ok(CellValue::Bool(*b)),
        Value::String(s) => Ok(CellValue::String(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(CellValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(CellValue::Float(f))
            } else {
                Err(ValidatorError::InvalidTable(format!(
                    "column '{}' holds an unrepresentable number",
                    column
                )))
            }
        }
        other => Err(ValidatorError::InvalidTable(format!(
            "column '{}' holds a non-scalar cell: {}",
            column, other
        ))),
    }
}

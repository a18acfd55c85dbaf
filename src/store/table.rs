use serde::{Serialize, Deserialize};
use crate::compute::error::{ModelError, ModelResult};

/// A single cell of a raw IO table as the host hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Empty => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Number(v) }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s.to_string()) }
}

/// Rectangular table with named columns. Rows are addressed by the label
/// found in whichever column the caller designates as the names column.
///
/// Every row has exactly one cell per column; deserialization goes through
/// the same check as [`RawTable::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTableDoc")]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Unchecked wire form of a `RawTable`.
#[derive(Deserialize)]
struct RawTableDoc {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<RawTableDoc> for RawTable {
    type Error = ModelError;

    fn try_from(doc: RawTableDoc) -> ModelResult<Self> {
        RawTable::new(doc.columns, doc.rows)
    }
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> ModelResult<Self> {
        let width = columns.len();
        if let Some((i, _)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ModelError::mismatch(format!(
                "row {} has {} cells, table has {} columns", i, rows[i].len(), width
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from a label column plus a purely numeric grid, the
    /// shape most hosts already hold their data in.
    pub fn from_labeled(
        names_column: &str,
        labels: Vec<String>,
        value_columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> ModelResult<Self> {
        if labels.len() != values.len() {
            return Err(ModelError::mismatch(format!(
                "{} row labels for {} value rows", labels.len(), values.len()
            )));
        }
        let mut columns = Vec::with_capacity(value_columns.len() + 1);
        columns.push(names_column.to_string());
        columns.extend(value_columns);

        let rows = labels.into_iter().zip(values)
            .map(|(label, vals)| {
                let mut row = Vec::with_capacity(vals.len() + 1);
                row.push(Cell::Text(label));
                row.extend(vals.into_iter().map(Cell::Number));
                row
            })
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn rows(&self) -> &[Vec<Cell>] { &self.rows }
    pub fn cell(&self, row: usize, col: usize) -> &Cell { &self.rows[row][col] }

    pub fn height(&self) -> usize { self.rows.len() }
    pub fn width(&self) -> usize { self.columns.len() }

    pub fn column_index(&self, name: &str) -> ModelResult<usize> {
        self.columns.iter().position(|c| c == name)
            .ok_or_else(|| ModelError::invalid(format!("unknown column '{}'", name)))
    }

    /// Index of the first row whose names-column cell equals `label`.
    pub fn row_index(&self, names_col: usize, label: &str) -> ModelResult<usize> {
        self.rows.iter()
            .position(|r| r[names_col].as_label().as_deref() == Some(label))
            .ok_or_else(|| ModelError::invalid(format!("unknown row '{}'", label)))
    }

    /// Reads a numeric cell. Blank cells read as zero.
    pub fn number(&self, row: usize, col: usize) -> ModelResult<f64> {
        match &self.rows[row][col] {
            Cell::Number(v) => Ok(*v),
            Cell::Empty => Ok(0.0),
            Cell::Text(t) => Err(ModelError::invalid(format!(
                "non-numeric value '{}' at row {} in column '{}'", t, row, self.columns[col]
            ))),
        }
    }
}

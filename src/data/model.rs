use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the scalar dtypes a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// The canonical string form of a cell.
///
/// This is what filtering compares against and what export writes, so the
/// two always agree:
/// * integers: plain decimal (`30`)
/// * floats: shortest round-trip digits, integral values keep `.0` (`40.0`),
///   non-finite values are `nan`, `inf`, `-inf`
/// * booleans: `True` / `False`
/// * null: the empty string
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write_float(f, *v),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::Null => Ok(()),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }
    // f64's Display never uses exponent notation, so a missing '.' means
    // the value is integral.
    let digits = v.to_string();
    if digits.contains('.') {
        f.write_str(&digits)
    } else {
        write!(f, "{digits}.0")
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The column type this cell would imply on its own.
    fn column_type(&self) -> Option<ColumnType> {
        match self {
            CellValue::String(_) => Some(ColumnType::String),
            CellValue::Integer(_) => Some(ColumnType::Integer),
            CellValue::Float(_) => Some(ColumnType::Float),
            CellValue::Bool(_) => Some(ColumnType::Bool),
            CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred dtype of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Bool,
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::String => "str",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Dataset – ordered rows × named columns
// ---------------------------------------------------------------------------

/// An in-memory table. Every row holds exactly one cell per column, in
/// column order; missing values are [`CellValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    types: Vec<ColumnType>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, checking the column set is unique and every row is
    /// exactly as wide as the header.
    ///
    /// Column types are taken from the cells: a column whose non-null
    /// cells all share one variant gets that type, anything else (mixed or
    /// all-null) is `String`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(LoadError::DuplicateColumn(name.clone()));
            }
        }

        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(LoadError::Shape {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }

        let types = (0..columns.len())
            .map(|col| {
                let mut kinds = rows.iter().filter_map(|r| r[col].column_type());
                match kinds.next() {
                    Some(first) if kinds.all(|k| k == first) => first,
                    _ => ColumnType::String,
                }
            })
            .collect();

        Ok(Dataset {
            columns,
            types,
            rows,
        })
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Inferred type for each column, parallel to [`Dataset::columns`].
    pub fn column_types(&self) -> &[ColumnType] {
        &self.types
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row` in column `name`, if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|cells| &cells[col])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A new dataset with the same schema holding only the rows at
    /// `indices`, in the order given. Out-of-range indices are skipped.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            types: self.types.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Sorted canonical strings present in a column, nulls excluded.
    /// Used to suggest filter values.
    pub fn distinct_values(&self, name: &str) -> BTreeSet<String> {
        let Some(col) = self.column_index(name) else {
            return BTreeSet::new();
        };
        self.rows
            .iter()
            .map(|cells| &cells[col])
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn people() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into()],
            vec![
                vec![s("Alice"), CellValue::Integer(30)],
                vec![s("Bob"), CellValue::Integer(25)],
                vec![s("Alice"), CellValue::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn canonical_strings() {
        assert_eq!(CellValue::Integer(30).to_string(), "30");
        assert_eq!(CellValue::Integer(-4).to_string(), "-4");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Float(40.0).to_string(), "40.0");
        assert_eq!(CellValue::Float(-0.0).to_string(), "-0.0");
        assert_eq!(CellValue::Float(0.1).to_string(), "0.1");
        assert_eq!(CellValue::Float(f64::NAN).to_string(), "nan");
        assert_eq!(CellValue::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(s("  padded ").to_string(), "  padded ");
    }

    #[test]
    fn floats_are_always_positional() {
        let big = CellValue::Float(1e300).to_string();
        assert_eq!(big.len(), 303);
        assert!(big.starts_with("1000"));
        assert!(big.ends_with(".0"));
        assert_eq!(CellValue::Float(1e-7).to_string(), "0.0000001");
        assert_eq!(CellValue::Float(1.5e16).to_string(), "15000000000000000.0");
    }

    #[test]
    fn column_types_follow_cells() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Null, CellValue::Float(1.5)],
                vec![CellValue::Null, CellValue::Null, s("x")],
            ],
        )
        .unwrap();
        assert_eq!(
            ds.column_types(),
            &[ColumnType::Integer, ColumnType::String, ColumnType::String]
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Shape {
                row: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Dataset::new(vec!["a".into(), "a".into()], Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn cell_lookup_and_counts() {
        let ds = people();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.cell(1, "name"), Some(&s("Bob")));
        assert_eq!(ds.cell(2, "age"), Some(&CellValue::Null));
        assert_eq!(ds.cell(3, "age"), None);
        assert_eq!(ds.cell(0, "missing"), None);
    }

    #[test]
    fn select_rows_keeps_schema_and_order() {
        let ds = people();
        let subset = ds.select_rows(&[2, 0]);
        assert_eq!(subset.columns(), ds.columns());
        assert_eq!(subset.column_types(), ds.column_types());
        assert_eq!(subset.rows(), &[ds.rows()[2].clone(), ds.rows()[0].clone()]);
    }

    #[test]
    fn distinct_values_skip_nulls() {
        let ds = people();
        let ages: Vec<String> = ds.distinct_values("age").into_iter().collect();
        assert_eq!(ages, vec!["25", "30"]);
        let names: Vec<String> = ds.distinct_values("name").into_iter().collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert!(ds.distinct_values("nope").is_empty());
    }
}

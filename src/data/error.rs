use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors – raised while turning raw bytes into a Dataset
// ---------------------------------------------------------------------------

/// Why a CSV upload could not be turned into a rectangular dataset.
///
/// A failed load never touches the previously loaded table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing but whitespace (or nothing at all) was supplied.
    #[error("no columns to parse from file")]
    Empty,

    /// The input is not valid UTF-8.
    #[error("invalid UTF-8 on line {line}")]
    Encoding { line: u64 },

    /// A data row carries more fields than the header declares.
    #[error("line {line}: expected {expected} fields, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A row handed to [`Dataset::new`](super::model::Dataset::new) does not
    /// match the column count.
    #[error("row {row}: expected {expected} cells, got {found}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Any other structural problem reported by the CSV reader.
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Filter errors – input rejected before any matching happens
// ---------------------------------------------------------------------------

/// Rejected filter input. Neither variant mutates the table store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The filter value is empty after trimming whitespace.
    #[error("please enter a filter value")]
    EmptyValue,

    /// The column is not part of the loaded dataset.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

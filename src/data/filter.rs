use super::model::Dataset;

// ---------------------------------------------------------------------------
// Exact-match filter
// ---------------------------------------------------------------------------

/// Return indices of rows whose `column` cell, rendered in its canonical
/// string form, equals `value` exactly.
///
/// Comparison is plain string equality: case-sensitive, no trimming of the
/// stored cell and no numeric coercion (`"5"` matches the integer `5` but
/// not the float `5.0`). Null cells render as the empty string. An unknown
/// column matches nothing.
pub fn matching_rows(dataset: &Dataset, column: &str, value: &str) -> Vec<usize> {
    let Some(col) = dataset.column_index(column) else {
        return Vec::new();
    };

    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, cells)| cells[col].to_string() == value)
        .map(|(i, _)| i)
        .collect()
}

/// The subset of `dataset` matching `column == value`, original row order
/// preserved.
pub fn filter_rows(dataset: &Dataset, column: &str, value: &str) -> Dataset {
    dataset.select_rows(&matching_rows(dataset, column, value))
}

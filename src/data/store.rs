use super::error::{FilterError, LoadError};
use super::filter::filter_rows;
use super::loader::{parse_csv, serialize};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter bookkeeping
// ---------------------------------------------------------------------------

/// The column/value pair behind the current active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub column: String,
    pub value: String,
}

/// Result of a filter request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The active view now holds `matched` rows.
    Applied { matched: usize },
    /// Nothing matched; the active view was left as it was.
    NoMatch,
}

impl FilterOutcome {
    /// Number of matching rows (0 for [`FilterOutcome::NoMatch`]).
    pub fn matched(self) -> usize {
        match self {
            FilterOutcome::Applied { matched } => matched,
            FilterOutcome::NoMatch => 0,
        }
    }
}

/// Row/column counts for the full dataset and the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub visible_rows: usize,
    pub visible_columns: usize,
}

// ---------------------------------------------------------------------------
// TableStore
// ---------------------------------------------------------------------------

/// The loaded dataset plus the view currently shown and exported.
///
/// * with no filter active, the view equals the full dataset
/// * with a filter active, the view is a row subset of it in original order
/// * the full dataset is only ever replaced wholesale by a new load
///
/// One store per session; nothing here is shared.
#[derive(Debug, Default)]
pub struct TableStore {
    full: Option<Dataset>,
    active: Option<Dataset>,
    filter: Option<ActiveFilter>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `bytes` and make the result both the full dataset and the
    /// active view. On error the store is left untouched.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&Dataset, LoadError> {
        let dataset = parse_csv(bytes)?;
        Ok(self.load_dataset(dataset))
    }

    /// Install an already-built dataset, clearing any filter.
    pub fn load_dataset(&mut self, dataset: Dataset) -> &Dataset {
        log::info!(
            "Loaded {} rows with columns {:?}",
            dataset.row_count(),
            dataset.columns()
        );
        self.active = Some(dataset.clone());
        self.filter = None;
        self.full.insert(dataset)
    }

    /// Narrow the active view to rows whose `column` equals `value`.
    ///
    /// `value` is trimmed first; a blank value or a column that is not in
    /// the loaded dataset is rejected without touching state. A filter that
    /// matches nothing reports [`FilterOutcome::NoMatch`] and also leaves
    /// the current view and filter flag as they were.
    ///
    /// Filtering always starts from the full dataset, never from the
    /// current view.
    pub fn apply_filter(&mut self, column: &str, value: &str) -> Result<FilterOutcome, FilterError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FilterError::EmptyValue);
        }
        let full = match &self.full {
            Some(ds) if ds.has_column(column) => ds,
            _ => return Err(FilterError::UnknownColumn(column.to_string())),
        };

        let subset = filter_rows(full, column, value);
        if subset.is_empty() {
            log::info!("Filter {column} == {value:?} matched no rows; view unchanged");
            return Ok(FilterOutcome::NoMatch);
        }

        let matched = subset.row_count();
        log::info!(
            "Filter {column} == {value:?} matched {matched} of {} rows",
            full.row_count()
        );
        self.active = Some(subset);
        self.filter = Some(ActiveFilter {
            column: column.to_string(),
            value: value.to_string(),
        });
        Ok(FilterOutcome::Applied { matched })
    }

    /// Show the full dataset again. Safe to call at any time.
    pub fn reset_filter(&mut self) {
        if self.filter.take().is_some() {
            log::info!("Filter cleared");
        }
        self.active = self.full.clone();
    }

    /// The dataset currently shown and exported.
    pub fn current_view(&self) -> Option<&Dataset> {
        self.active.as_ref()
    }

    pub fn full_dataset(&self) -> Option<&Dataset> {
        self.full.as_ref()
    }

    pub fn is_filter_active(&self) -> bool {
        self.filter.is_some()
    }

    pub fn active_filter(&self) -> Option<&ActiveFilter> {
        self.filter.as_ref()
    }

    pub fn summary(&self) -> Option<ViewSummary> {
        let full = self.full.as_ref()?;
        let active = self.active.as_ref()?;
        Some(ViewSummary {
            total_rows: full.row_count(),
            total_columns: full.column_count(),
            visible_rows: active.row_count(),
            visible_columns: active.column_count(),
        })
    }

    /// The active view as CSV bytes, or `None` before anything is loaded.
    pub fn export_current_view(&self) -> Option<Result<Vec<u8>, csv::Error>> {
        self.active.as_ref().map(serialize)
    }
}

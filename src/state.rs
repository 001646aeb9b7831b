use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ViewerConfig;
use crate::data::error::FilterError;
use crate::data::store::{FilterOutcome, TableStore};

// ---------------------------------------------------------------------------
// Status banner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A one-line message shown under the toolbar until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table and its active view.
    pub store: TableStore,

    /// File name of the last successful load.
    pub source_name: Option<String>,

    /// Column picked in the filter combo box.
    pub filter_column: String,

    /// Text typed into the filter value field.
    pub filter_value: String,

    /// Outcome of the last user action.
    pub notice: Option<Notice>,

    pub config: ViewerConfig,
}

impl AppState {
    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Read a CSV file from disk and load it.
    pub fn open_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match std::fs::read(path).with_context(|| format!("reading {}", path.display())) {
            Ok(bytes) => self.load_bytes(&name, &bytes),
            Err(e) => {
                log::error!("Failed to open file: {e:#}");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Error reading the CSV file: {e:#}"),
                ));
            }
        }
    }

    /// Load uploaded bytes. A failed load keeps whatever was shown before.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) {
        match self.store.load(bytes) {
            Ok(dataset) => {
                if !dataset.has_column(&self.filter_column) {
                    self.filter_column = dataset.columns().first().cloned().unwrap_or_default();
                }
                self.source_name = Some(name.to_string());
                self.notice = Some(Notice::new(
                    NoticeLevel::Success,
                    "File uploaded successfully!",
                ));
            }
            Err(e) => {
                log::error!("Failed to load {name}: {e}");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Error reading the CSV file: {e}"),
                ));
            }
        }
    }

    /// Apply the column/value currently entered in the side panel.
    pub fn apply_filter(&mut self) {
        let column = self.filter_column.clone();
        let value = self.filter_value.clone();

        self.notice = Some(match self.store.apply_filter(&column, &value) {
            Ok(FilterOutcome::Applied { .. }) => Notice::new(
                NoticeLevel::Success,
                format!("Filter applied on column '{column}' with value '{}'", value.trim()),
            ),
            Ok(FilterOutcome::NoMatch) => Notice::new(
                NoticeLevel::Warning,
                format!(
                    "No rows match the filter value '{}' in column '{column}'",
                    value.trim()
                ),
            ),
            Err(FilterError::EmptyValue) => {
                log::warn!("Rejected blank filter value");
                Notice::new(NoticeLevel::Warning, "Please enter a filter value")
            }
            Err(e @ FilterError::UnknownColumn(_)) => {
                log::warn!("Rejected filter: {e}");
                Notice::new(NoticeLevel::Error, format!("Error applying filter: {e}"))
            }
        });
    }

    pub fn reset_filter(&mut self) {
        self.store.reset_filter();
        self.notice = Some(Notice::new(
            NoticeLevel::Success,
            "Filter reset. Showing all data.",
        ));
    }

    /// "n of m" line shown while a filter is active.
    pub fn filter_status(&self) -> Option<String> {
        if !self.store.is_filter_active() {
            return None;
        }
        let summary = self.store.summary()?;
        Some(format!(
            "Showing filtered data: {} rows out of {} total rows",
            summary.visible_rows, summary.total_rows
        ))
    }

    /// Distinct values of the selected column, offered as filter shortcuts.
    pub fn value_suggestions(&self) -> Vec<String> {
        self.store
            .full_dataset()
            .map(|ds| ds.distinct_values(&self.filter_column).into_iter().collect())
            .unwrap_or_default()
    }

    /// Write the active view to `path` and report the result.
    pub fn export_to(&mut self, path: &Path) {
        self.notice = Some(match self.write_export(path) {
            Ok(rows) => {
                log::info!("Exported {rows} rows to {}", path.display());
                Notice::new(
                    NoticeLevel::Success,
                    format!("Saved {rows} rows to {}", path.display()),
                )
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Notice::new(NoticeLevel::Error, format!("Export failed: {e:#}"))
            }
        });
    }

    fn write_export(&self, path: &Path) -> Result<usize> {
        let view = self
            .store
            .current_view()
            .context("no dataset loaded")?;
        let bytes = self
            .store
            .export_current_view()
            .context("no dataset loaded")?
            .context("serializing CSV")?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(view.row_count())
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::DiagramConfig;
use crate::data::loader::TableLoader;
use crate::diagram::{self, Diagram};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the window shows: a finished diagram or the reason there is none.
pub struct AppState {
    /// Directory the tables were read from.
    pub data_dir: PathBuf,

    /// Assembled diagram (None when loading failed).
    pub diagram: Option<Diagram>,

    /// Error message shown in the status bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the tables from `dir` and build the diagram.
    ///
    /// Failures are kept as a status message so the window can still open.
    pub fn load(dir: &Path, config: DiagramConfig) -> Self {
        match load_diagram(dir, config) {
            Ok(diagram) => {
                log::info!(
                    "Built diagram with {} series ({} points)",
                    diagram.series.len(),
                    diagram.point_count()
                );
                Self {
                    data_dir: dir.to_path_buf(),
                    diagram: Some(diagram),
                    status_message: None,
                }
            }
            Err(e) => {
                log::error!("Failed to build diagram: {e:#}");
                Self {
                    data_dir: dir.to_path_buf(),
                    diagram: None,
                    status_message: Some(format!("Error: {e:#}")),
                }
            }
        }
    }
}

/// Read, validate and assemble. Errors carry the data directory as context.
pub fn load_diagram(dir: &Path, config: DiagramConfig) -> Result<Diagram> {
    let tables = TableLoader::new(dir, config.tables.clone(), config.sum_tolerance)
        .load()
        .with_context(|| format!("loading tables from {}", dir.display()))?;
    let diagram = diagram::build(&tables, config).context("building diagram")?;
    Ok(diagram)
}

use std::path::PathBuf;

use thiserror::Error;

use crate::series::SeriesKey;

// ---------------------------------------------------------------------------
// Errors raised while building a diagram
// ---------------------------------------------------------------------------

/// Everything that can stop a diagram from being built.
///
/// `DataShape`, `MissingSeries`, `UnstyledSeries` and `DuplicateSeries` all
/// describe input that does not have the expected shape; they are fatal and
/// raised before any rendering happens.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("{table}: {reason}")]
    DataShape { table: String, reason: String },

    #[error("series `{0}` has no points")]
    EmptySeries(SeriesKey),

    #[error("series `{0}` is configured but no points were supplied for it")]
    MissingSeries(SeriesKey),

    #[error("points were supplied for `{0}` but it has no presentation")]
    UnstyledSeries(SeriesKey),

    #[error("series `{0}` appears more than once")]
    DuplicateSeries(SeriesKey),

    #[error("invalid colour `{0}`")]
    InvalidColor(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiagramError {
    pub fn data_shape(table: &str, reason: impl Into<String>) -> Self {
        DiagramError::DataShape {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

/// Why a raw row could not become a [`CompositionRecord`](crate::data::model::CompositionRecord).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("{component} fraction {value} is not a finite number")]
    NotFinite { component: &'static str, value: f64 },

    #[error("{component} fraction {value} is negative")]
    Negative { component: &'static str, value: f64 },

    #[error("fractions sum to {sum}, expected 1")]
    BadSum { sum: f64 },
}

use eframe::egui::Color32;

use crate::color::{generate_palette, parse_color};
use crate::data::loader::TableFiles;
use crate::error::DiagramError;
use crate::series::{
    EmptySeriesPolicy, LinePattern, Mark, Marker, PresentationConfig, SeriesKey, SeriesStyle,
};

// ---------------------------------------------------------------------------
// Diagram configuration
// ---------------------------------------------------------------------------

/// Everything that shapes the figure. Built once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    /// Length of each axis; fractions are multiplied by this (default 100).
    pub scale: f64,
    /// Spacing of gridlines and ticks, in axis units (default 10).
    pub grid_interval: f64,
    /// Samples per fitted curve, endpoints included (default 400).
    pub sample_count: usize,
    /// Allowed deviation of a measured row's fraction sum from 1 (default 1e-6).
    pub sum_tolerance: f64,
    /// Largest acceptable gap between the plait point and either fitted curve
    /// before a warning is logged (default 0.01).
    pub plait_tolerance: f64,
    pub title: String,
    pub labels: AxisLabels,
    pub colors: SeriesColors,
    pub empty_series: EmptySeriesPolicy,
    pub tables: TableFiles,
}

/// Corner and edge captions.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabels {
    pub right_corner: String,
    pub top_corner: String,
    pub left_corner: String,
    pub left_edge: String,
    pub right_edge: String,
    pub bottom_edge: String,
}

/// Colour names or hex codes, one per data set.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColors {
    pub binodal: String,
    /// Tie lines beyond this list get generated colours.
    pub tie_lines: Vec<String>,
    pub conjugate: String,
    pub plait_point: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            scale: 100.0,
            grid_interval: 10.0,
            sample_count: 400,
            sum_tolerance: 1e-6,
            plait_tolerance: 0.01,
            title: "Ternary Phase Diagram of Water-1-Butanol-Acetone Solvent System".to_string(),
            labels: AxisLabels::default(),
            colors: SeriesColors::default(),
            empty_series: EmptySeriesPolicy::Skip,
            tables: TableFiles::default(),
        }
    }
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            right_corner: "Water".to_string(),
            top_corner: "Acetone".to_string(),
            left_corner: "1-Butanol".to_string(),
            left_edge: "%v A-B Binary".to_string(),
            right_edge: "%v A-W Binary".to_string(),
            bottom_edge: "%v B-W Binary".to_string(),
        }
    }
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            binodal: "#4472C4".to_string(),
            tie_lines: vec!["#ED7D31".to_string(), "#A5A5A5".to_string(), "#FEC001".to_string()],
            conjugate: "green".to_string(),
            plait_point: "black".to_string(),
        }
    }
}

const MARKER_Z: i32 = 2;
const CURVE_Z: i32 = 1;

impl DiagramConfig {
    /// Colours for `n` tie lines: the configured ones first, then generated hues.
    fn tie_line_colors(&self, n: usize) -> Result<Vec<Color32>, DiagramError> {
        let mut colors = self
            .colors
            .tie_lines
            .iter()
            .take(n)
            .map(|c| parse_color(c))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.len() < n {
            colors.extend(generate_palette(n - colors.len()));
        }
        Ok(colors)
    }

    /// Styles for every series of a diagram with `tie_lines` tie lines.
    ///
    /// Scatter series carry the legend labels and sit above the unlabeled
    /// fitted curves and tie-line segments.
    pub fn presentation(&self, tie_lines: usize) -> Result<PresentationConfig, DiagramError> {
        let binodal = parse_color(&self.colors.binodal)?;
        let conjugate = parse_color(&self.colors.conjugate)?;
        let plait = parse_color(&self.colors.plait_point)?;
        let tie_colors = self.tie_line_colors(tie_lines)?;

        let scatter = |key, label: String, color, marker| SeriesStyle {
            key,
            label: Some(label),
            color,
            mark: Mark::Scatter(marker),
            z_order: MARKER_Z,
        };
        let line = |key, color, pattern| SeriesStyle {
            key,
            label: None,
            color,
            mark: Mark::Line(pattern),
            z_order: CURVE_Z,
        };

        let mut styles = vec![scatter(
            SeriesKey::BinodalPoints,
            "Binodal Curve".to_string(),
            binodal,
            Marker::Star,
        )];
        for (i, &color) in tie_colors.iter().enumerate() {
            let n = i + 1;
            styles.push(scatter(
                SeriesKey::TieLinePoints(n),
                format!("Tie Line #{n}"),
                color,
                Marker::Star,
            ));
        }
        styles.push(scatter(
            SeriesKey::ConjugatePoints,
            "Conjugate Curve".to_string(),
            conjugate,
            Marker::Circle,
        ));
        styles.push(scatter(
            SeriesKey::PlaitPoint,
            "Plait Point".to_string(),
            plait,
            Marker::Diamond,
        ));

        styles.push(line(SeriesKey::BinodalCurve, binodal, LinePattern::Solid));
        styles.push(line(SeriesKey::ConjugateCurve, conjugate, LinePattern::Dashed));
        for (i, &color) in tie_colors.iter().enumerate() {
            styles.push(line(SeriesKey::TieLine(i + 1), color, LinePattern::Dotted));
        }

        Ok(PresentationConfig {
            styles,
            empty_series: self.empty_series,
        })
    }
}

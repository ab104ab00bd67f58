use std::collections::BTreeMap;
use std::fmt;

use eframe::egui::Color32;

use crate::data::model::TernaryPoint;
use crate::error::DiagramError;

// ---------------------------------------------------------------------------
// Series identity and styling
// ---------------------------------------------------------------------------

/// Identifies one drawable series. Tie lines are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKey {
    /// Measured binodal points (scatter).
    BinodalPoints,
    /// Measured vertices of one tie line (scatter).
    TieLinePoints(usize),
    /// Conjugate-curve anchor points (scatter).
    ConjugatePoints,
    PlaitPoint,
    /// Fitted binodal polynomial (line).
    BinodalCurve,
    /// Fitted conjugate polynomial (line).
    ConjugateCurve,
    /// Segment through one tie line's vertices (line).
    TieLine(usize),
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::BinodalPoints => write!(f, "binodal points"),
            SeriesKey::TieLinePoints(n) => write!(f, "tie line #{n} points"),
            SeriesKey::ConjugatePoints => write!(f, "conjugate points"),
            SeriesKey::PlaitPoint => write!(f, "plait point"),
            SeriesKey::BinodalCurve => write!(f, "binodal curve"),
            SeriesKey::ConjugateCurve => write!(f, "conjugate curve"),
            SeriesKey::TieLine(n) => write!(f, "tie line #{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Star,
    Circle,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    Solid,
    Dashed,
    Dotted,
}

/// How a series is drawn: individual markers or a connected line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Scatter(Marker),
    Line(LinePattern),
}

/// Presentation of a single series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub key: SeriesKey,
    /// Legend entry; `None` keeps the series out of the legend.
    pub label: Option<String>,
    pub color: Color32,
    pub mark: Mark,
    /// Higher values draw on top.
    pub z_order: i32,
}

/// What to do with a series that ends up with no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySeriesPolicy {
    /// Log a warning and leave the series out.
    #[default]
    Skip,
    /// Fail with [`DiagramError::EmptySeries`].
    Raise,
}

/// Ordered styles plus the empty-series policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationConfig {
    pub styles: Vec<SeriesStyle>,
    pub empty_series: EmptySeriesPolicy,
}

// ---------------------------------------------------------------------------
// Input groups and output series
// ---------------------------------------------------------------------------

/// Points destined for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    pub key: SeriesKey,
    pub points: Vec<TernaryPoint>,
}

impl PointGroup {
    pub fn new(key: SeriesKey, points: Vec<TernaryPoint>) -> Self {
        Self { key, points }
    }
}

/// A styled series, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: SeriesKey,
    pub label: Option<String>,
    pub points: Vec<TernaryPoint>,
    pub color: Color32,
    pub mark: Mark,
    pub z_order: i32,
}

// ---------------------------------------------------------------------------
// SeriesAssembler
// ---------------------------------------------------------------------------

/// Pairs point groups with their styles.
///
/// Output follows the configured order, stably sorted by z-order so that
/// lower layers come first. Every supplied point lands in exactly one series.
pub struct SeriesAssembler<'c> {
    config: &'c PresentationConfig,
}

impl<'c> SeriesAssembler<'c> {
    pub fn new(config: &'c PresentationConfig) -> Self {
        Self { config }
    }

    pub fn assemble(&self, groups: Vec<PointGroup>) -> Result<Vec<Series>, DiagramError> {
        let mut by_key: BTreeMap<SeriesKey, Vec<TernaryPoint>> = BTreeMap::new();
        for group in groups {
            if by_key.insert(group.key, group.points).is_some() {
                return Err(DiagramError::DuplicateSeries(group.key));
            }
        }

        let mut series = Vec::with_capacity(self.config.styles.len());
        let mut seen = Vec::with_capacity(self.config.styles.len());
        for style in &self.config.styles {
            if seen.contains(&style.key) {
                return Err(DiagramError::DuplicateSeries(style.key));
            }
            seen.push(style.key);

            let points = by_key
                .remove(&style.key)
                .ok_or(DiagramError::MissingSeries(style.key))?;
            if points.is_empty() {
                match self.config.empty_series {
                    EmptySeriesPolicy::Skip => {
                        log::warn!("series `{}` has no points, not drawing it", style.key);
                        continue;
                    }
                    EmptySeriesPolicy::Raise => return Err(DiagramError::EmptySeries(style.key)),
                }
            }
            series.push(Series {
                key: style.key,
                label: style.label.clone(),
                points,
                color: style.color,
                mark: style.mark,
                z_order: style.z_order,
            });
        }

        if let Some(&key) = by_key.keys().next() {
            return Err(DiagramError::UnstyledSeries(key));
        }

        series.sort_by_key(|s| s.z_order);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(n: usize) -> Vec<TernaryPoint> {
        (0..n)
            .map(|i| {
                let w = i as f64;
                TernaryPoint::new(w, 10.0, 90.0 - w)
            })
            .collect()
    }

    fn style(key: SeriesKey, mark: Mark, z_order: i32) -> SeriesStyle {
        SeriesStyle {
            key,
            label: Some(key.to_string()),
            color: Color32::BLACK,
            mark,
            z_order,
        }
    }

    fn legend_config() -> PresentationConfig {
        let star = Mark::Scatter(Marker::Star);
        PresentationConfig {
            styles: vec![
                style(SeriesKey::BinodalPoints, star, 2),
                style(SeriesKey::TieLinePoints(1), star, 2),
                style(SeriesKey::TieLinePoints(2), star, 2),
                style(SeriesKey::TieLinePoints(3), star, 2),
                style(SeriesKey::ConjugatePoints, Mark::Scatter(Marker::Circle), 2),
                style(SeriesKey::PlaitPoint, Mark::Scatter(Marker::Diamond), 2),
            ],
            empty_series: EmptySeriesPolicy::Raise,
        }
    }

    #[test]
    fn test_six_groups_keep_order_and_counts() {
        let config = legend_config();
        let sizes = [14, 3, 3, 3, 3, 1];
        // Supply groups in reverse to show the config decides order.
        let groups: Vec<PointGroup> = config
            .styles
            .iter()
            .zip(sizes)
            .rev()
            .map(|(s, n)| PointGroup::new(s.key, pts(n)))
            .collect();

        let series = SeriesAssembler::new(&config).assemble(groups).unwrap();
        assert_eq!(series.len(), 6);
        for ((s, style), n) in series.iter().zip(&config.styles).zip(sizes) {
            assert_eq!(s.key, style.key);
            assert_eq!(s.points, pts(n));
        }
    }

    #[test]
    fn test_curves_render_below_markers() {
        let config = PresentationConfig {
            styles: vec![
                style(SeriesKey::PlaitPoint, Mark::Scatter(Marker::Diamond), 2),
                style(SeriesKey::BinodalCurve, Mark::Line(LinePattern::Solid), 1),
                style(SeriesKey::BinodalPoints, Mark::Scatter(Marker::Star), 2),
                style(SeriesKey::ConjugateCurve, Mark::Line(LinePattern::Dashed), 1),
            ],
            empty_series: EmptySeriesPolicy::Skip,
        };
        let groups = vec![
            PointGroup::new(SeriesKey::BinodalPoints, pts(4)),
            PointGroup::new(SeriesKey::BinodalCurve, pts(40)),
            PointGroup::new(SeriesKey::ConjugateCurve, pts(40)),
            PointGroup::new(SeriesKey::PlaitPoint, pts(1)),
        ];
        let keys: Vec<SeriesKey> = SeriesAssembler::new(&config)
            .assemble(groups)
            .unwrap()
            .iter()
            .map(|s| s.key)
            .collect();
        assert_eq!(
            keys,
            vec![
                SeriesKey::BinodalCurve,
                SeriesKey::ConjugateCurve,
                SeriesKey::PlaitPoint,
                SeriesKey::BinodalPoints,
            ]
        );
    }

    #[test]
    fn test_empty_series_skipped_or_raised() {
        let mut config = PresentationConfig {
            styles: vec![
                style(SeriesKey::BinodalCurve, Mark::Line(LinePattern::Solid), 1),
                style(SeriesKey::ConjugateCurve, Mark::Line(LinePattern::Dashed), 1),
            ],
            empty_series: EmptySeriesPolicy::Skip,
        };
        let groups = || {
            vec![
                PointGroup::new(SeriesKey::BinodalCurve, pts(5)),
                PointGroup::new(SeriesKey::ConjugateCurve, Vec::new()),
            ]
        };

        let series = SeriesAssembler::new(&config).assemble(groups()).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].key, SeriesKey::BinodalCurve);

        config.empty_series = EmptySeriesPolicy::Raise;
        let err = SeriesAssembler::new(&config).assemble(groups()).unwrap_err();
        assert!(matches!(err, DiagramError::EmptySeries(SeriesKey::ConjugateCurve)));
    }

    #[test]
    fn test_shape_errors() {
        let config = legend_config();

        let missing = vec![PointGroup::new(SeriesKey::BinodalPoints, pts(2))];
        assert!(matches!(
            SeriesAssembler::new(&config).assemble(missing),
            Err(DiagramError::MissingSeries(SeriesKey::TieLinePoints(1)))
        ));

        let mut extra: Vec<PointGroup> = config
            .styles
            .iter()
            .map(|s| PointGroup::new(s.key, pts(1)))
            .collect();
        extra.push(PointGroup::new(SeriesKey::TieLine(1), pts(3)));
        assert!(matches!(
            SeriesAssembler::new(&config).assemble(extra),
            Err(DiagramError::UnstyledSeries(SeriesKey::TieLine(1)))
        ));

        let duplicate = vec![
            PointGroup::new(SeriesKey::PlaitPoint, pts(1)),
            PointGroup::new(SeriesKey::PlaitPoint, pts(1)),
        ];
        assert!(matches!(
            SeriesAssembler::new(&config).assemble(duplicate),
            Err(DiagramError::DuplicateSeries(SeriesKey::PlaitPoint))
        ));
    }
}

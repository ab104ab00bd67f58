use crate::config::DiagramConfig;
use crate::data::curve::{CurveEvaluator, SampleRange};
use crate::data::mapper::TernaryMapper;
use crate::data::model::{CompositionRecord, PhaseTables};
use crate::error::DiagramError;
use crate::series::{PointGroup, Series, SeriesAssembler, SeriesKey};

// ---------------------------------------------------------------------------
// Diagram – the assembled figure
// ---------------------------------------------------------------------------

/// Styled series plus the configuration that produced them.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub series: Vec<Series>,
    pub config: DiagramConfig,
}

impl Diagram {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Water range over which the conjugate curve is defined: from the last
/// conjugate anchor to the plait point.
pub fn conjugate_range(tables: &PhaseTables, count: usize) -> SampleRange {
    let start = tables
        .conjugate_points
        .last()
        .map_or(tables.plait_point.water(), |p| p.water());
    SampleRange::new(start, tables.plait_point.water(), count)
}

/// Acetone distance from the plait point to the binodal and conjugate fits.
pub fn plait_residuals(tables: &PhaseTables) -> (f64, f64) {
    let plait = &tables.plait_point;
    let binodal = (tables.binodal_model.eval(plait.water()) - plait.acetone()).abs();
    let conjugate = (tables.conjugate_model.eval(plait.water()) - plait.acetone()).abs();
    (binodal, conjugate)
}

/// Map, evaluate and assemble every series of the diagram.
pub fn build(tables: &PhaseTables, config: DiagramConfig) -> Result<Diagram, DiagramError> {
    let mapper = TernaryMapper::new(config.scale);
    log::debug!(
        "binodal model degree {} {:?}, conjugate model degree {} {:?}",
        tables.binodal_model.degree(),
        tables.binodal_model.coefficients(),
        tables.conjugate_model.degree(),
        tables.conjugate_model.coefficients()
    );

    let (binodal_gap, conjugate_gap) = plait_residuals(tables);
    if binodal_gap > config.plait_tolerance || conjugate_gap > config.plait_tolerance {
        log::warn!(
            "plait point {} is off the fitted curves \
             (binodal {binodal_gap:.4}, conjugate {conjugate_gap:.4})",
            tables.plait_point
        );
    }

    let binodal_curve: Vec<CompositionRecord> = CurveEvaluator::binodal(&tables.binodal_model)
        .evaluate(SampleRange::new(0.0, 1.0, config.sample_count))
        .collect();
    let conj_range = conjugate_range(tables, config.sample_count);
    if conj_range.start > conj_range.end {
        log::warn!(
            "conjugate curve range {:.4}..{:.4} is inverted",
            conj_range.start,
            conj_range.end
        );
    }
    let conjugate_curve: Vec<CompositionRecord> =
        CurveEvaluator::conjugate(&tables.conjugate_model)
            .evaluate(conj_range)
            .collect();
    log::debug!(
        "evaluated {} binodal and {} conjugate samples",
        binodal_curve.len(),
        conjugate_curve.len()
    );

    let mut groups = vec![
        PointGroup::new(SeriesKey::BinodalPoints, mapper.map_all(&tables.binodal_points)),
        PointGroup::new(SeriesKey::ConjugatePoints, mapper.map_all(&tables.conjugate_points)),
        PointGroup::new(SeriesKey::PlaitPoint, vec![mapper.map(&tables.plait_point)]),
        PointGroup::new(SeriesKey::BinodalCurve, mapper.map_all(&binodal_curve)),
        PointGroup::new(SeriesKey::ConjugateCurve, mapper.map_all(&conjugate_curve)),
    ];
    for (i, tie) in tables.tie_lines.iter().enumerate() {
        let points = mapper.map_all(&tie.points);
        groups.push(PointGroup::new(SeriesKey::TieLinePoints(i + 1), points.clone()));
        groups.push(PointGroup::new(SeriesKey::TieLine(i + 1), points));
    }

    let presentation = config.presentation(tables.tie_lines.len())?;
    let series = SeriesAssembler::new(&presentation).assemble(groups)?;
    log::info!("assembled {} series", series.len());

    Ok(Diagram { series, config })
}

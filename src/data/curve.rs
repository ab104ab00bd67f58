use super::model::{CompositionRecord, PolynomialModel};

// ---------------------------------------------------------------------------
// SampleRange – evenly spaced independent-variable values
// ---------------------------------------------------------------------------

/// `count` evenly spaced values from `start` to `end`, both included.
///
/// A range whose start lies past its end yields nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl SampleRange {
    pub fn new(start: f64, end: f64, count: usize) -> Self {
        Self { start, end, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.start > self.end
    }

    pub fn iter(&self) -> Linspace {
        Linspace {
            range: *self,
            next: 0,
        }
    }
}

impl IntoIterator for SampleRange {
    type Item = f64;
    type IntoIter = Linspace;

    fn into_iter(self) -> Linspace {
        self.iter()
    }
}

/// Iterator over a [`SampleRange`].
#[derive(Debug, Clone)]
pub struct Linspace {
    range: SampleRange,
    next: usize,
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let SampleRange { start, end, count } = self.range;
        if self.range.is_empty() || self.next >= count {
            return None;
        }
        let i = self.next;
        self.next += 1;
        if count == 1 {
            return Some(start);
        }
        if i == count - 1 {
            return Some(end);
        }
        let step = (end - start) / (count - 1) as f64;
        Some(start + step * i as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.range.is_empty() {
            0
        } else {
            self.range.count - self.next
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Linspace {}

// ---------------------------------------------------------------------------
// CurveEvaluator
// ---------------------------------------------------------------------------

/// Which model outputs are physically meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainFilter {
    /// Drop samples whose model output is negative.
    NonNegative,
    /// Keep every sample; the range is already restricted to the valid domain.
    None,
}

/// Turns a polynomial into a stream of compositions.
///
/// The model maps the independent fraction `x` to a dependent fraction `y`;
/// the third fraction is `1 - x - y`. With `water_is_independent` set, `x` is
/// water and `y` acetone, otherwise the two swap.
#[derive(Debug, Clone, Copy)]
pub struct CurveEvaluator<'m> {
    model: &'m PolynomialModel,
    filter: DomainFilter,
    water_is_independent: bool,
}

impl<'m> CurveEvaluator<'m> {
    pub fn new(
        model: &'m PolynomialModel,
        filter: DomainFilter,
        water_is_independent: bool,
    ) -> Self {
        Self {
            model,
            filter,
            water_is_independent,
        }
    }

    /// Acetone as a function of water, outside-of-domain samples dropped.
    pub fn binodal(model: &'m PolynomialModel) -> Self {
        Self::new(model, DomainFilter::NonNegative, true)
    }

    /// Acetone as a function of water over a pre-restricted range.
    pub fn conjugate(model: &'m PolynomialModel) -> Self {
        Self::new(model, DomainFilter::None, true)
    }

    /// Lazily evaluate the model over `range`. Each call starts afresh.
    pub fn evaluate(&self, range: SampleRange) -> CurveSamples<'m> {
        CurveSamples {
            evaluator: *self,
            xs: range.iter(),
        }
    }
}

/// Iterator returned by [`CurveEvaluator::evaluate`].
#[derive(Debug, Clone)]
pub struct CurveSamples<'m> {
    evaluator: CurveEvaluator<'m>,
    xs: Linspace,
}

impl Iterator for CurveSamples<'_> {
    type Item = CompositionRecord;

    fn next(&mut self) -> Option<CompositionRecord> {
        let ev = &self.evaluator;
        for x in self.xs.by_ref() {
            let y = ev.model.eval(x);
            if ev.filter == DomainFilter::NonNegative && y < 0.0 {
                log::trace!("skipping sample x={x}: model output {y} is negative");
                continue;
            }
            let record = if ev.water_is_independent {
                CompositionRecord::from_water_acetone(x, y)
            } else {
                CompositionRecord::from_water_acetone(y, x)
            };
            return Some(record);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.xs.size_hint();
        match self.evaluator.filter {
            DomainFilter::None => self.xs.size_hint(),
            DomainFilter::NonNegative => (0, upper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mapper::TernaryMapper;

    fn binodal(coeffs: [f64; 6]) -> PolynomialModel {
        PolynomialModel::from_descending(coeffs.to_vec())
    }

    #[test]
    fn test_linspace_includes_endpoints() {
        let xs: Vec<f64> = SampleRange::new(0.0, 1.0, 5).into_iter().collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(SampleRange::new(0.3, 0.9, 400).iter().len(), 400);
        assert_eq!(SampleRange::new(0.3, 0.9, 400).iter().last(), Some(0.9));
    }

    #[test]
    fn test_linspace_degenerate_ranges() {
        assert_eq!(SampleRange::new(0.3, 0.1, 10).iter().count(), 0);
        assert_eq!(SampleRange::new(0.0, 1.0, 0).iter().count(), 0);
        let single: Vec<f64> = SampleRange::new(0.4, 0.8, 1).into_iter().collect();
        assert_eq!(single, vec![0.4]);
        let point: Vec<f64> = SampleRange::new(0.5, 0.5, 3).into_iter().collect();
        assert_eq!(point, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_linear_binodal_scenario() {
        // y = 1 - x
        let model = binodal([0.0, 0.0, 0.0, 0.0, -1.0, 1.0]);
        let mapper = TernaryMapper::default();
        let points: Vec<[f64; 3]> = CurveEvaluator::binodal(&model)
            .evaluate(SampleRange::new(0.0, 1.0, 5))
            .map(|r| mapper.map(&r).coords())
            .collect();
        assert_eq!(
            points,
            vec![
                [0.0, 100.0, 0.0],
                [25.0, 75.0, 0.0],
                [50.0, 50.0, 0.0],
                [75.0, 25.0, 0.0],
                [100.0, 0.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_negative_binodal_is_filtered() {
        // y = x - 1, negative everywhere but x = 1
        let model = binodal([0.0, 0.0, 0.0, 0.0, 1.0, -1.0]);
        let records: Vec<_> = CurveEvaluator::binodal(&model)
            .evaluate(SampleRange::new(0.0, 1.0, 400))
            .collect();
        assert!(records.len() <= 1);
        for rec in &records {
            assert_eq!(rec.water(), 1.0);
            assert_eq!(rec.acetone(), 0.0);
        }
    }

    #[test]
    fn test_binodal_never_emits_negative_acetone() {
        // y = -4x² + 4x - 0.5, negative near both ends
        let model = binodal([0.0, 0.0, 0.0, -4.0, 4.0, -0.5]);
        let records: Vec<_> = CurveEvaluator::binodal(&model)
            .evaluate(SampleRange::new(0.0, 1.0, 101))
            .collect();
        assert!(!records.is_empty());
        assert!(records.len() < 101);
        assert!(records.iter().all(|r| r.acetone() >= 0.0));
        assert!(records.windows(2).all(|w| w[0].water() < w[1].water()));
    }

    #[test]
    fn test_conjugate_is_not_filtered() {
        // y = -0.1 + 0.0x + 0.0x², always negative
        let model = PolynomialModel::from_ascending(vec![-0.1, 0.0, 0.0]);
        let count = CurveEvaluator::conjugate(&model)
            .evaluate(SampleRange::new(0.2, 0.6, 7))
            .count();
        assert_eq!(count, 7);
    }

    #[test]
    fn test_records_sum_to_one() {
        let model = binodal([1.3, -2.1, 0.4, -1.7, 1.9, 0.02]);
        for rec in CurveEvaluator::binodal(&model).evaluate(SampleRange::new(0.0, 1.0, 400)) {
            assert!((rec.sum() - 1.0).abs() < 1e-6);
        }
        let conj = PolynomialModel::from_ascending(vec![0.04, 0.1, 0.2]);
        for rec in CurveEvaluator::conjugate(&conj).evaluate(SampleRange::new(0.3, 0.7, 50)) {
            assert!((rec.sum() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let model = binodal([0.0, 0.0, 0.0, -1.4, 1.47, -0.133]);
        let evaluator = CurveEvaluator::binodal(&model);
        let range = SampleRange::new(0.0, 1.0, 400);
        let first: Vec<_> = evaluator.evaluate(range).collect();
        let second: Vec<_> = evaluator.evaluate(range).collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_inverted_range_yields_empty_sequence() {
        let model = PolynomialModel::from_ascending(vec![0.04, 0.1, 0.2]);
        let mut samples =
            CurveEvaluator::conjugate(&model).evaluate(SampleRange::new(0.3, 0.1, 400));
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_acetone_as_independent_variable() {
        // water = 0.5 - acetone
        let model = PolynomialModel::from_ascending(vec![0.5, -1.0]);
        let records: Vec<_> = CurveEvaluator::new(&model, DomainFilter::None, false)
            .evaluate(SampleRange::new(0.0, 0.5, 3))
            .collect();
        assert_eq!(records[1].acetone(), 0.25);
        assert_eq!(records[1].water(), 0.25);
        assert_eq!(records[1].butanol(), 0.5);
    }
}

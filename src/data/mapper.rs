use super::model::{CompositionRecord, TernaryPoint};

/// Scales volume fractions onto the diagram's axes.
///
/// The mapping is purely linear; validation happens when records are loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TernaryMapper {
    scale: f64,
}

impl Default for TernaryMapper {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

impl TernaryMapper {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn map(&self, record: &CompositionRecord) -> TernaryPoint {
        TernaryPoint::new(
            record.water() * self.scale,
            record.acetone() * self.scale,
            record.butanol() * self.scale,
        )
    }

    pub fn map_all<'a, I>(&self, records: I) -> Vec<TernaryPoint>
    where
        I: IntoIterator<Item = &'a CompositionRecord>,
    {
        records.into_iter().map(|r| self.map(r)).collect()
    }
}

use std::fmt;

use crate::error::CompositionError;

// ---------------------------------------------------------------------------
// CompositionRecord – one point of the water / acetone / 1-butanol system
// ---------------------------------------------------------------------------

/// Volume fractions of a single mixture.
///
/// Records read from the input tables go through [`CompositionRecord::try_new`]
/// and are guaranteed to sum to 1. Records computed from a polynomial derive
/// their last component, so they sum to 1 by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionRecord {
    water: f64,
    acetone: f64,
    butanol: f64,
}

impl CompositionRecord {
    /// Validate three measured fractions.
    ///
    /// Each must be finite and no more negative than `tolerance`, and their
    /// sum must be within `tolerance` of 1.
    pub fn try_new(
        water: f64,
        acetone: f64,
        butanol: f64,
        tolerance: f64,
    ) -> Result<Self, CompositionError> {
        for (component, value) in [("water", water), ("acetone", acetone), ("butanol", butanol)] {
            if !value.is_finite() {
                return Err(CompositionError::NotFinite { component, value });
            }
            if value < -tolerance {
                return Err(CompositionError::Negative { component, value });
            }
        }
        let sum = water + acetone + butanol;
        if (sum - 1.0).abs() > tolerance {
            return Err(CompositionError::BadSum { sum });
        }
        Ok(Self {
            water,
            acetone,
            butanol,
        })
    }

    /// Build a record from water and acetone; butanol is whatever is left.
    pub fn from_water_acetone(water: f64, acetone: f64) -> Self {
        Self {
            water,
            acetone,
            butanol: 1.0 - water - acetone,
        }
    }

    pub fn water(&self) -> f64 {
        self.water
    }

    pub fn acetone(&self) -> f64 {
        self.acetone
    }

    pub fn butanol(&self) -> f64 {
        self.butanol
    }

    /// Fractions in axis order: water, acetone, butanol.
    #[cfg(test)]
    pub fn fractions(&self) -> [f64; 3] {
        [self.water, self.acetone, self.butanol]
    }

    #[cfg(test)]
    pub fn sum(&self) -> f64 {
        self.water + self.acetone + self.butanol
    }
}

impl fmt::Display for CompositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(water {:.4}, acetone {:.4}, butanol {:.4})",
            self.water, self.acetone, self.butanol
        )
    }
}

// ---------------------------------------------------------------------------
// TernaryPoint – plotting-space coordinates
// ---------------------------------------------------------------------------

/// A composition scaled onto the diagram (0..=scale on each axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TernaryPoint {
    coords: [f64; 3],
}

impl TernaryPoint {
    pub(crate) fn new(water: f64, acetone: f64, butanol: f64) -> Self {
        Self {
            coords: [water, acetone, butanol],
        }
    }

    pub fn water(&self) -> f64 {
        self.coords[0]
    }

    pub fn acetone(&self) -> f64 {
        self.coords[1]
    }

    #[cfg(test)]
    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    #[cfg(test)]
    pub fn sum(&self) -> f64 {
        self.coords.iter().sum()
    }

    /// Project onto the plane: butanol corner at the origin, water corner at
    /// `(scale, 0)`, acetone at the apex.
    pub fn to_cartesian(&self) -> [f64; 2] {
        let x = self.water() + self.acetone() / 2.0;
        let y = self.acetone() * 3f64.sqrt() / 2.0;
        [x, y]
    }
}

// ---------------------------------------------------------------------------
// PolynomialModel
// ---------------------------------------------------------------------------

/// Polynomial in one variable, coefficients stored highest degree first.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialModel {
    coefficients: Vec<f64>,
}

impl PolynomialModel {
    /// `[c0, c1, .., cn]` meaning `c0·xⁿ + c1·xⁿ⁻¹ + .. + cn`.
    pub fn from_descending(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// `[c0, c1, .., cn]` meaning `c0 + c1·x + .. + cn·xⁿ`.
    pub fn from_ascending(mut coefficients: Vec<f64>) -> Self {
        coefficients.reverse();
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree of the polynomial; an empty model counts as degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }
}

// ---------------------------------------------------------------------------
// Loaded tables
// ---------------------------------------------------------------------------

/// Three consecutive rows of the tie-line table.
#[derive(Debug, Clone, PartialEq)]
pub struct TieLine {
    pub points: [CompositionRecord; 3],
}

/// Everything read from the input directory, already validated.
#[derive(Debug, Clone)]
pub struct PhaseTables {
    /// Measured binodal points, sorted by water fraction.
    pub binodal_points: Vec<CompositionRecord>,
    pub tie_lines: Vec<TieLine>,
    /// Conjugate-curve anchor points (every row but the last).
    pub conjugate_points: Vec<CompositionRecord>,
    pub plait_point: CompositionRecord,
    /// Acetone as a function of water, degree 5.
    pub binodal_model: PolynomialModel,
    /// Acetone as a function of water, degree 2.
    pub conjugate_model: PolynomialModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_valid_fractions() {
        let rec = CompositionRecord::try_new(0.2, 0.3, 0.5, 1e-6).unwrap();
        assert_eq!(rec.fractions(), [0.2, 0.3, 0.5]);
        assert!((rec.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_new_rejects_bad_sum() {
        let err = CompositionRecord::try_new(0.2, 0.3, 0.6, 1e-6).unwrap_err();
        assert!(matches!(err, CompositionError::BadSum { .. }));
    }

    #[test]
    fn test_try_new_rejects_negative_and_nan() {
        let err = CompositionRecord::try_new(-0.1, 0.6, 0.5, 1e-6).unwrap_err();
        assert_eq!(
            err,
            CompositionError::Negative {
                component: "water",
                value: -0.1
            }
        );
        let err = CompositionRecord::try_new(0.5, f64::NAN, 0.5, 1e-6).unwrap_err();
        assert!(matches!(err, CompositionError::NotFinite { component: "acetone", .. }));
    }

    #[test]
    fn test_try_new_tolerates_rounding_noise() {
        // 1 - 0.3 - 0.7 is a tiny negative number in f64.
        let butanol = 1.0 - 0.3 - 0.7;
        assert!(CompositionRecord::try_new(0.3, 0.7, butanol, 1e-6).is_ok());
    }

    #[test]
    fn test_from_water_acetone_derives_butanol() {
        let rec = CompositionRecord::from_water_acetone(0.25, 0.5);
        assert_eq!(rec.butanol(), 0.25);
    }

    #[test]
    fn test_polynomial_eval_matches_power_sum() {
        let coeffs = vec![0.5, -1.25, 2.0, 0.75, -3.0, 0.1];
        let model = PolynomialModel::from_descending(coeffs.clone());
        assert_eq!(model.degree(), 5);
        for x in [0.0_f64, 0.13, 0.5, 0.87, 1.0] {
            let direct: f64 = coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| c * x.powi((5 - i) as i32))
                .sum();
            assert!((model.eval(x) - direct).abs() < 1e-12);
        }
    }

    #[test]
    fn test_polynomial_from_ascending_reverses() {
        // y = 1 + 2x + 3x²
        let model = PolynomialModel::from_ascending(vec![1.0, 2.0, 3.0]);
        assert_eq!(model.coefficients(), &[3.0, 2.0, 1.0]);
        assert_eq!(model.eval(2.0), 17.0);
    }

    #[test]
    fn test_cartesian_corners() {
        let water = TernaryPoint::new(100.0, 0.0, 0.0).to_cartesian();
        let butanol = TernaryPoint::new(0.0, 0.0, 100.0).to_cartesian();
        let acetone = TernaryPoint::new(0.0, 100.0, 0.0).to_cartesian();
        assert_eq!(water, [100.0, 0.0]);
        assert_eq!(butanol, [0.0, 0.0]);
        assert!((acetone[0] - 50.0).abs() < 1e-12);
        assert!((acetone[1] - 50.0 * 3f64.sqrt()).abs() < 1e-12);
    }
}

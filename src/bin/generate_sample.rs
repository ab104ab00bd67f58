//! Writes a consistent set of the five input tables into the current directory.

use anyhow::{Context, Result};

/// Binodal: acetone = -1.4·w² + 1.47·w - 0.133, highest degree first.
const BINODAL: [f64; 6] = [0.0, 0.0, 0.0, -1.4, 1.47, -0.133];
/// Conjugate: acetone = 0.042 + 0.1·w + 0.2·w², lowest degree first.
const CONJUGATE: [f64; 3] = [0.042, 0.1, 0.2];
const PLAIT_WATER: f64 = 0.7;

fn binodal(w: f64) -> f64 {
    BINODAL.iter().fold(0.0, |acc, &c| acc * w + c)
}

fn conjugate(w: f64) -> f64 {
    CONJUGATE.iter().rev().fold(0.0, |acc, &c| acc * w + c)
}

/// Round to six decimals, as a lab spreadsheet would export them.
fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Water, acetone and butanol with butanol taking up the rounding.
fn composition(water: f64, acetone: f64) -> [f64; 3] {
    let water = round6(water);
    let acetone = round6(acetone.max(0.0));
    [water, acetone, round6(1.0 - water - acetone)]
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[-1, 1)`.
    fn next_signed(&mut self) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        unit * 2.0 - 1.0
    }
}

fn write_table(path: &str, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {path}", rows.len());
    Ok(())
}

fn fraction_row(id: String, c: [f64; 3]) -> Vec<String> {
    let mut row = vec![id];
    row.extend(c.iter().map(|v| v.to_string()));
    row
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let fractions = ["v% Water", "v% Acetone", "v% 1-Butanol"];

    // Measured binodal points scatter slightly around the fitted curve.
    let binodal_rows: Vec<Vec<String>> = (0..18)
        .map(|i| {
            let w = 0.1 + 0.05 * i as f64;
            let noise = if i == 0 || i == 17 { 0.0 } else { 0.003 * rng.next_signed() };
            fraction_row((i + 1).to_string(), composition(w, binodal(w) + noise))
        })
        .collect();
    let mut header = vec!["Point"];
    header.extend(fractions);
    write_table("TPDV_Binodal_Curve_Points.csv", &header, &binodal_rows)?;

    // Each tie line: raffinate on the binodal, overall mixture, extract on the binodal.
    let mut tie_rows = Vec::new();
    for (n, (left, right)) in [(0.15, 0.9), (0.2, 0.85), (0.28, 0.78)].into_iter().enumerate() {
        let (al, ar) = (binodal(left), binodal(right));
        let mid = (left + right) / 2.0;
        let vertices = [
            composition(left, al),
            composition(mid, (al + ar) / 2.0),
            composition(right, ar),
        ];
        for (j, c) in vertices.into_iter().enumerate() {
            let mut row = vec![(n * 3 + j + 1).to_string(), (n + 1).to_string()];
            row.extend(c.iter().map(|v| v.to_string()));
            tie_rows.push(row);
        }
    }
    let mut header = vec!["Point", "Tie Line"];
    header.extend(fractions);
    write_table("TPDV_Tie_Line_Points.csv", &header, &tie_rows)?;

    // Three conjugate anchors below the plait point, then the plait point itself.
    let mut conj_rows: Vec<Vec<String>> = [0.35, 0.45, 0.55]
        .into_iter()
        .enumerate()
        .map(|(i, w)| fraction_row((i + 1).to_string(), composition(w, conjugate(w))))
        .collect();
    conj_rows.push(fraction_row(
        "Plait Point".to_string(),
        composition(PLAIT_WATER, binodal(PLAIT_WATER)),
    ));
    let mut header = vec!["Point"];
    header.extend(fractions);
    write_table("TPDV_ConjCurve_and_PlaitPoint_Points.csv", &header, &conj_rows)?;

    let binodal_coeffs: Vec<Vec<String>> = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .zip(BINODAL)
        .map(|(label, c)| vec![label.to_string(), c.to_string()])
        .collect();
    write_table(
        "TPDV_Binodal_Curve_Polynomial_Coefficients.csv",
        &["Coefficient", "Value"],
        &binodal_coeffs,
    )?;

    let conj_coeffs: Vec<Vec<String>> = ["A", "B", "C"]
        .iter()
        .zip(CONJUGATE)
        .map(|(label, c)| vec![label.to_string(), c.to_string()])
        .collect();
    write_table(
        "TPDV_ConjCurve_Polynomial_Coefficients.csv",
        &["Coefficient", "Value"],
        &conj_coeffs,
    )?;

    Ok(())
}

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::IgnoredAny;

use super::model::{CompositionRecord, PhaseTables, PolynomialModel, TieLine};
use crate::error::DiagramError;

// ---------------------------------------------------------------------------
// Input file names
// ---------------------------------------------------------------------------

/// File names of the five input tables, relative to the data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFiles {
    pub binodal_points: PathBuf,
    pub tie_lines: PathBuf,
    pub conjugate_points: PathBuf,
    pub binodal_coefficients: PathBuf,
    pub conjugate_coefficients: PathBuf,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            binodal_points: "TPDV_Binodal_Curve_Points.csv".into(),
            tie_lines: "TPDV_Tie_Line_Points.csv".into(),
            conjugate_points: "TPDV_ConjCurve_and_PlaitPoint_Points.csv".into(),
            binodal_coefficients: "TPDV_Binodal_Curve_Polynomial_Coefficients.csv".into(),
            conjugate_coefficients: "TPDV_ConjCurve_Polynomial_Coefficients.csv".into(),
        }
    }
}

const BINODAL_COEFFICIENTS: usize = 6;
const CONJUGATE_COEFFICIENTS: usize = 3;
/// Three tie lines of three vertices each.
const TIE_LINE_ROWS: usize = 9;
/// Three conjugate-curve anchors, then the plait point.
const CONJUGATE_ROWS: usize = 4;
const PLAIT_ROW: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Reads and validates all tables found in `dir`.
#[derive(Debug, Clone)]
pub struct TableLoader {
    dir: PathBuf,
    files: TableFiles,
    tolerance: f64,
}

impl TableLoader {
    pub fn new(dir: impl Into<PathBuf>, files: TableFiles, tolerance: f64) -> Self {
        Self {
            dir: dir.into(),
            files,
            tolerance,
        }
    }

    /// Load every table. The first malformed table aborts the whole load.
    pub fn load(&self) -> Result<PhaseTables, DiagramError> {
        let binodal_points = self.read(&self.files.binodal_points, |name, r| {
            parse_binodal_points(r, name, self.tolerance)
        })?;
        let tie_lines = self.read(&self.files.tie_lines, |name, r| {
            parse_tie_lines(r, name, self.tolerance)
        })?;
        let (conjugate_points, plait_point) =
            self.read(&self.files.conjugate_points, |name, r| {
                parse_conjugate_points(r, name, self.tolerance)
            })?;
        let binodal_model = self.read(&self.files.binodal_coefficients, |name, r| {
            parse_coefficients(r, name, BINODAL_COEFFICIENTS)
                .map(PolynomialModel::from_descending)
        })?;
        let conjugate_model = self.read(&self.files.conjugate_coefficients, |name, r| {
            parse_coefficients(r, name, CONJUGATE_COEFFICIENTS)
                .map(PolynomialModel::from_ascending)
        })?;

        log::info!(
            "Loaded {} binodal points, {} tie lines, {} conjugate anchors from {}",
            binodal_points.len(),
            tie_lines.len(),
            conjugate_points.len(),
            self.dir.display()
        );

        Ok(PhaseTables {
            binodal_points,
            tie_lines,
            conjugate_points,
            plait_point,
            binodal_model,
            conjugate_model,
        })
    }

    fn read<T>(
        &self,
        file: &Path,
        parse: impl FnOnce(&str, File) -> Result<T, DiagramError>,
    ) -> Result<T, DiagramError> {
        let path = self.dir.join(file);
        let name = file.display().to_string();
        log::debug!("reading {}", path.display());
        let handle = File::open(&path).map_err(|source| DiagramError::Io {
            path: path.clone(),
            source,
        })?;
        parse(&name, handle)
    }
}

// ---------------------------------------------------------------------------
// Composition tables
// ---------------------------------------------------------------------------

/// Column indices of the three fraction columns.
#[derive(Debug, Clone, Copy)]
struct FractionColumns {
    water: usize,
    acetone: usize,
    butanol: usize,
}

/// Locate the fraction columns by header name, e.g. `v% Water`.
fn find_fraction_columns(
    headers: &csv::StringRecord,
    table: &str,
) -> Result<FractionColumns, DiagramError> {
    let find = |needle: &str| {
        headers
            .iter()
            .position(|h| h.to_ascii_lowercase().contains(needle))
            .ok_or_else(|| {
                DiagramError::data_shape(table, format!("missing '{needle}' column"))
            })
    };
    Ok(FractionColumns {
        water: find("water")?,
        acetone: find("acetone")?,
        butanol: find("butanol")?,
    })
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    table: &str,
) -> Result<f64, DiagramError> {
    let raw = record.get(idx).ok_or_else(|| {
        DiagramError::data_shape(table, format!("row {row}: missing column {idx}"))
    })?;
    raw.trim().parse::<f64>().map_err(|_| {
        DiagramError::data_shape(table, format!("row {row}: '{raw}' is not a number"))
    })
}

/// Parse every row of a composition table.
fn parse_compositions<R: Read>(
    reader: R,
    table: &str,
    tolerance: f64,
) -> Result<Vec<CompositionRecord>, DiagramError> {
    let mut reader = csv::Reader::from_reader(reader);
    let cols = find_fraction_columns(reader.headers()?, table)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let water = parse_cell(&record, cols.water, row, table)?;
        let acetone = parse_cell(&record, cols.acetone, row, table)?;
        let butanol = parse_cell(&record, cols.butanol, row, table)?;
        let composition = CompositionRecord::try_new(water, acetone, butanol, tolerance)
            .map_err(|e| DiagramError::data_shape(table, format!("row {row}: {e}")))?;
        records.push(composition);
    }
    Ok(records)
}

/// Binodal points, sorted by water fraction.
pub fn parse_binodal_points<R: Read>(
    reader: R,
    table: &str,
    tolerance: f64,
) -> Result<Vec<CompositionRecord>, DiagramError> {
    let mut points = parse_compositions(reader, table, tolerance)?;
    if points.is_empty() {
        return Err(DiagramError::data_shape(table, "no rows"));
    }
    points.sort_by(|a, b| a.water().total_cmp(&b.water()));
    Ok(points)
}

/// Tie-line vertices: exactly nine rows, grouped into consecutive triples.
pub fn parse_tie_lines<R: Read>(
    reader: R,
    table: &str,
    tolerance: f64,
) -> Result<Vec<TieLine>, DiagramError> {
    let points = parse_compositions(reader, table, tolerance)?;
    if points.len() != TIE_LINE_ROWS {
        return Err(DiagramError::data_shape(
            table,
            format!("expected {TIE_LINE_ROWS} rows, found {}", points.len()),
        ));
    }
    Ok(points
        .chunks_exact(3)
        .map(|c| TieLine {
            points: [c[0], c[1], c[2]],
        })
        .collect())
}

/// Three conjugate-curve anchors followed by the plait point on the fourth row.
pub fn parse_conjugate_points<R: Read>(
    reader: R,
    table: &str,
    tolerance: f64,
) -> Result<(Vec<CompositionRecord>, CompositionRecord), DiagramError> {
    let mut points = parse_compositions(reader, table, tolerance)?;
    if points.len() != CONJUGATE_ROWS {
        return Err(DiagramError::data_shape(
            table,
            format!("expected {CONJUGATE_ROWS} rows, found {}", points.len()),
        ));
    }
    let plait = points.remove(PLAIT_ROW);
    Ok((points, plait))
}

// ---------------------------------------------------------------------------
// Coefficient tables
// ---------------------------------------------------------------------------

/// Coefficient values in file order; the table must have exactly `expected` rows.
pub fn parse_coefficients<R: Read>(
    reader: R,
    table: &str,
    expected: usize,
) -> Result<Vec<f64>, DiagramError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut values = Vec::with_capacity(expected);
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() < 2 {
            return Err(DiagramError::data_shape(
                table,
                format!("row {row}: missing value column"),
            ));
        }
        // `label,value`; the label is informational only.
        let (_, value): (IgnoredAny, f64) = record
            .deserialize(None)
            .map_err(|e| DiagramError::data_shape(table, format!("row {row}: {e}")))?;
        if !value.is_finite() {
            return Err(DiagramError::data_shape(
                table,
                format!("row {row}: coefficient is not finite"),
            ));
        }
        values.push(value);
    }
    if values.len() != expected {
        return Err(DiagramError::data_shape(
            table,
            format!("expected {expected} coefficients, found {}", values.len()),
        ));
    }
    Ok(values)
}

use super::candidate::EvaluatedCandidate;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    #[error("CSV write error for '{path}': {source}")]
    File { path: String, source: csv::Error },
    #[error("Failed to flush CSV output: {source}")]
    Flush { source: std::io::Error },
}

/// Column names, in the field order of [`CandidateRow`].
pub const HEADER: [&str; 11] = [
    "a_prime",
    "b_prime",
    "height",
    "f_rf",
    "v_rf_required",
    "q",
    "depth",
    "meets_criteria",
    "v_rf_feasible",
    "q_feasible",
    "depth_feasible",
];

/// One flat CSV record per evaluated candidate.
#[derive(Debug, Serialize)]
struct CandidateRow {
    a_prime: f64,
    b_prime: f64,
    height: f64,
    f_rf: f64,
    v_rf_required: f64,
    q: f64,
    depth: f64,
    meets_criteria: bool,
    v_rf_feasible: bool,
    q_feasible: bool,
    depth_feasible: bool,
}

impl From<&EvaluatedCandidate> for CandidateRow {
    fn from(c: &EvaluatedCandidate) -> Self {
        Self {
            a_prime: c.a_prime(),
            b_prime: c.b_prime(),
            height: c.height,
            f_rf: c.f_rf(),
            v_rf_required: c.v_rf_required(),
            q: c.q(),
            depth: c.depth,
            meets_criteria: c.meets_criteria(),
            v_rf_feasible: c.feasibility.voltage(),
            q_feasible: c.feasibility.q(),
            depth_feasible: c.feasibility.depth(),
        }
    }
}

fn write_rows<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    candidates: &[EvaluatedCandidate],
) -> Result<(), csv::Error> {
    // serde only emits the header alongside the first record
    if candidates.is_empty() {
        return csv_writer.write_record(HEADER);
    }
    for candidate in candidates {
        csv_writer.serialize(CandidateRow::from(candidate))?;
    }
    Ok(())
}

/// Writes `candidates` as CSV. The header row is written even when
/// `candidates` is empty.
pub fn write_candidates<W: Write>(
    writer: W,
    candidates: &[EvaluatedCandidate],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_rows(&mut csv_writer, candidates)?;
    csv_writer
        .flush()
        .map_err(|source| ExportError::Flush { source })
}

pub fn write_candidates_to_path(
    path: &Path,
    candidates: &[EvaluatedCandidate],
) -> Result<(), ExportError> {
    let to_file_error = |source| ExportError::File {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut csv_writer = csv::Writer::from_path(path).map_err(to_file_error)?;
    write_rows(&mut csv_writer, candidates).map_err(to_file_error)?;
    csv_writer
        .flush()
        .map_err(|source| ExportError::Flush { source })
}

//! Reader for whitespace-separated `.dat` current files.
//!
//! EICS rows are `latitude longitude Jx Jy`, SECS rows `latitude longitude J`.
//! Blank lines and lines starting with `#` or `%` are skipped.

use std::path::{Path, PathBuf};

use secs_common::{CurrentSystem, TimePoint};
use tracing::{debug, info};

use crate::error::{DataError, DataResult};
use crate::frame::{CurrentFrame, EicsSample, SecsSample};
use crate::paths::data_files;

fn parse_fields(path: &Path, line_no: usize, line: &str, expected: usize) -> DataResult<Vec<f64>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(DataError::MalformedRow {
            path: path.to_path_buf(),
            line: line_no,
            message: format!("expected {} columns, found {}", expected, fields.len()),
        });
    }
    fields
        .iter()
        .map(|f| {
            f.parse::<f64>().map_err(|_| DataError::MalformedRow {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("not a number: {:?}", f),
            })
        })
        .collect()
}

/// Parse the text of one file. `path` is only used in error messages.
pub fn parse_rows(path: &Path, text: &str, system: CurrentSystem) -> DataResult<CurrentFrame> {
    let expected = system.columns().len();
    let mut frame = CurrentFrame::empty(system);

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let v = parse_fields(path, idx + 1, line, expected)?;
        match &mut frame {
            CurrentFrame::Eics(samples) => samples.push(EicsSample {
                latitude: v[0],
                longitude: v[1],
                jx: v[2],
                jy: v[3],
            }),
            CurrentFrame::Secs(samples) => samples.push(SecsSample {
                latitude: v[0],
                longitude: v[1],
                j: v[2],
            }),
        }
    }

    Ok(frame)
}

/// Read one file.
pub fn read_data_file(path: &Path, system: CurrentSystem) -> DataResult<CurrentFrame> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let frame = parse_rows(path, &text, system)?;
    debug!(path = %path.display(), rows = frame.len(), "Read data file");
    Ok(frame)
}

/// Read and concatenate several files in order.
pub fn read_data_files(paths: &[PathBuf], system: CurrentSystem) -> DataResult<CurrentFrame> {
    let mut frame = CurrentFrame::empty(system);
    for path in paths {
        frame.extend(read_data_file(path, system)?);
    }
    Ok(frame)
}

/// Load everything recorded for `time` under `root`.
///
/// Fails with [`DataError::NotFound`] when no slot file exists and with
/// [`DataError::Empty`] when the files hold no rows.
pub fn load_frame(root: &Path, system: CurrentSystem, time: &TimePoint) -> DataResult<CurrentFrame> {
    let candidates = data_files(root, system, time, time);
    let existing: Vec<PathBuf> = candidates.iter().filter(|p| p.is_file()).cloned().collect();

    if existing.is_empty() {
        return Err(DataError::NotFound {
            system: system.to_string(),
            time: time.to_string(),
            searched: candidates,
        });
    }

    let frame = read_data_files(&existing, system)?;
    if frame.is_empty() {
        return Err(DataError::Empty(format!("{} files for {}", system, time)));
    }

    info!(
        system = %system,
        time = %time,
        files = existing.len(),
        rows = frame.len(),
        "Loaded current data"
    );
    Ok(frame)
}

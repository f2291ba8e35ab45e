//! On-disk fixtures laid out like the current-system archive.
//!
//! Files live at `<root>/<PREFIX>/%Y/%m/%d/<PREFIX>%Y%m%d_%H%M%S.dat` and hold
//! whitespace-separated numeric rows.

use chrono::NaiveDateTime;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Request time format used by the fixtures (`2020-06-21/18:00:00`).
pub const FIXTURE_TIME_FORMAT: &str = "%Y-%m-%d/%H:%M:%S";

/// A fixed time with data in the standard fixtures.
pub const REFERENCE_TIME: &str = "2020-06-21/18:00:00";

/// Render rows as a `.dat` body with a comment header.
pub fn format_rows<const N: usize>(header: &str, rows: &[[f64; N]]) -> String {
    let mut body = format!("# {}\n", header);
    for row in rows {
        let line: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
        // Writing to a String cannot fail
        let _ = writeln!(body, "{}", line.join("  "));
    }
    body
}

/// Relative archive path of the file for `prefix` at `time`.
///
/// Panics on a malformed `time`; fixtures are written by tests.
pub fn data_file_relpath(prefix: &str, time: &str) -> PathBuf {
    let ndt = NaiveDateTime::parse_from_str(time, FIXTURE_TIME_FORMAT)
        .unwrap_or_else(|e| panic!("bad fixture time {:?}: {}", time, e));
    PathBuf::from(prefix)
        .join(ndt.format("%Y").to_string())
        .join(ndt.format("%m").to_string())
        .join(ndt.format("%d").to_string())
        .join(format!("{}{}.dat", prefix, ndt.format("%Y%m%d_%H%M%S")))
}

/// A temporary data root, removed on drop.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory for rendered plots inside the fixture.
    pub fn plots_dir(&self) -> PathBuf {
        self.dir.path().join("plots")
    }

    /// Write `contents` as the `prefix` file for `time`; returns its path.
    pub fn write_raw(&self, prefix: &str, time: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(data_file_relpath(prefix, time));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dirs");
        }
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Write EICS rows `[lat, lon, Jx, Jy]` for `time`.
    pub fn write_eics(&self, time: &str, rows: &[[f64; 4]]) -> PathBuf {
        self.write_raw("EICS", time, &format_rows("latitude longitude Jx Jy", rows))
    }

    /// Write SECS rows `[lat, lon, J]` for `time`.
    pub fn write_secs(&self, time: &str, rows: &[[f64; 3]]) -> PathBuf {
        self.write_raw("SECS", time, &format_rows("latitude longitude J", rows))
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relpath_layout() {
        let p = data_file_relpath("EICS", "2020-06-21/18:00:05");
        assert_eq!(p, PathBuf::from("EICS/2020/06/21/EICS20200621_180005.dat"));
    }

    #[test]
    fn test_format_rows() {
        let body = format_rows("latitude longitude J", &[[60.0, -100.0, 1.5]]);
        assert_eq!(body, "# latitude longitude J\n60.000000  -100.000000  1.500000\n");
    }

    #[test]
    fn test_write_secs_creates_tree() {
        let data = DataDir::new();
        let path = data.write_secs(REFERENCE_TIME, &[[60.0, -100.0, 1.0]]);
        assert!(path.exists());
        assert!(path.starts_with(data.root()));
    }
}

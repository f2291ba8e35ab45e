//! Tests for loading current files from an archive layout on disk.

use secs_common::{CurrentSystem, PlotError, TimePoint};
use secs_data::{load_frame, max_abs, read_data_files, CurrentFrame, DataError};
use test_utils::{eics_rows, sample_lattice, secs_rows, DataDir, EICS_JY_PEAK, REFERENCE_TIME};

fn reference_time() -> TimePoint {
    TimePoint::parse(REFERENCE_TIME).unwrap()
}

// ============================================================================
// load_frame tests
// ============================================================================

#[test]
fn test_load_eics_frame() {
    let data = DataDir::new();
    let rows = eics_rows(&sample_lattice());
    data.write_eics(REFERENCE_TIME, &rows);

    let frame = load_frame(data.root(), CurrentSystem::Eics, &reference_time()).unwrap();
    assert_eq!(frame.system(), CurrentSystem::Eics);
    assert_eq!(frame.len(), rows.len());

    let jy = frame.contour_component();
    let peak = max_abs(&jy).unwrap();
    assert!((peak - EICS_JY_PEAK).abs() < 1e-3, "peak {}", peak);
}

#[test]
fn test_load_floors_to_file_slot() {
    let data = DataDir::new();
    data.write_secs(REFERENCE_TIME, &secs_rows(&sample_lattice()));

    let t = TimePoint::parse("2020-06-21/18:00:09").unwrap();
    let frame = load_frame(data.root(), CurrentSystem::Secs, &t).unwrap();
    assert!(matches!(frame, CurrentFrame::Secs(_)));
}

#[test]
fn test_missing_file_is_not_found() {
    let data = DataDir::new();
    data.write_secs(REFERENCE_TIME, &secs_rows(&sample_lattice()));

    // SECS exists, EICS does not.
    let err = load_frame(data.root(), CurrentSystem::Eics, &reference_time()).unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));

    let plot_err: PlotError = err.into();
    assert!(matches!(plot_err, PlotError::DataNotAvailable(_)));
}

#[test]
fn test_comment_only_file_is_empty() {
    let data = DataDir::new();
    data.write_raw("EICS", REFERENCE_TIME, "# nothing recorded\n");

    let err = load_frame(data.root(), CurrentSystem::Eics, &reference_time()).unwrap_err();
    assert!(matches!(err, DataError::Empty(_)));
    assert!(matches!(PlotError::from(err), PlotError::EmptyDataset(_)));
}

#[test]
fn test_malformed_file_maps_to_read_error() {
    let data = DataDir::new();
    data.write_raw("EICS", REFERENCE_TIME, "60 -100 1 2\n60 -95 oops 2\n");

    let err = load_frame(data.root(), CurrentSystem::Eics, &reference_time()).unwrap_err();
    assert!(matches!(err, DataError::MalformedRow { line: 2, .. }));
    assert!(matches!(PlotError::from(err), PlotError::DataReadError(_)));
}

// ============================================================================
// read_data_files tests
// ============================================================================

#[test]
fn test_read_several_files_concatenates() {
    let data = DataDir::new();
    let rows = secs_rows(&sample_lattice());
    let a = data.write_secs("2020-06-21/18:00:00", &rows[..10]);
    let b = data.write_secs("2020-06-21/18:00:10", &rows[10..25]);

    let frame = read_data_files(&[a, b], CurrentSystem::Secs).unwrap();
    assert_eq!(frame.len(), 25);
}

#[test]
fn test_unreadable_path_is_io_error() {
    let data = DataDir::new();
    let missing = data.root().join("nope.dat");
    let err = read_data_files(&[missing], CurrentSystem::Secs).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}

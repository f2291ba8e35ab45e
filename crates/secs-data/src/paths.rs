//! Archive layout of current files.
//!
//! One file per time slot at `<PREFIX>/%Y/%m/%d/<PREFIX>%Y%m%d_%H%M%S.dat`,
//! with slots every [`FILE_RESOLUTION_SECS`] seconds.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use secs_common::{CurrentSystem, TimePoint};

/// Spacing of file time slots (seconds).
pub const FILE_RESOLUTION_SECS: i64 = 10;

/// Path of the file for `instant`, relative to the data root.
pub fn relative_path(system: CurrentSystem, instant: DateTime<Utc>) -> PathBuf {
    let prefix = system.prefix();
    PathBuf::from(prefix)
        .join(instant.format("%Y").to_string())
        .join(instant.format("%m").to_string())
        .join(instant.format("%d").to_string())
        .join(format!("{}{}.dat", prefix, instant.format("%Y%m%d_%H%M%S")))
}

/// Slot start times covering `[start, end]`.
///
/// Slots run from `floor(start / res)` up to, but not including,
/// `ceil(end / res)`; a single instant always yields its own slot.
pub fn slot_times(start: &TimePoint, end: &TimePoint) -> Vec<TimePoint> {
    let res = FILE_RESOLUTION_SECS;
    let first = start.timestamp().div_euclid(res);
    let last = (end.timestamp() + res - 1).div_euclid(res);
    let count = (last - first).max(1);

    (0..count)
        .filter_map(|i| TimePoint::from_timestamp((first + i) * res))
        .collect()
}

/// Absolute paths of every slot file between `start` and `end` under `root`.
///
/// Paths are returned whether or not the files exist.
pub fn data_files(root: &Path, system: CurrentSystem, start: &TimePoint, end: &TimePoint) -> Vec<PathBuf> {
    slot_times(start, end)
        .iter()
        .map(|t| root.join(relative_path(system, t.instant())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tp(s: &str) -> TimePoint {
        TimePoint::parse(s).unwrap()
    }

    #[test]
    fn test_relative_path_layout() {
        let path = relative_path(CurrentSystem::Eics, tp("2020-06-21/18:00:00").instant());
        assert_eq!(path, PathBuf::from("EICS/2020/06/21/EICS20200621_180000.dat"));

        let path = relative_path(CurrentSystem::Secs, tp("2017-03-27/07:05:40").instant());
        assert_eq!(path, PathBuf::from("SECS/2017/03/27/SECS20170327_070540.dat"));
    }

    #[test]
    fn test_single_instant_gives_one_slot() {
        let t = tp("2020-06-21/18:00:00");
        assert_eq!(slot_times(&t, &t), vec![t]);
    }

    #[test]
    fn test_instant_floors_to_slot() {
        let t = tp("2020-06-21/18:00:07");
        assert_eq!(slot_times(&t, &t), vec![tp("2020-06-21/18:00:00")]);
    }

    #[test]
    fn test_range_covers_every_slot() {
        let slots = slot_times(&tp("2020-06-21/18:00:00"), &tp("2020-06-21/18:00:30"));
        let expected: Vec<TimePoint> = ["18:00:00", "18:00:10", "18:00:20"]
            .iter()
            .map(|s| tp(&format!("2020-06-21/{}", s)))
            .collect();
        assert_eq!(slots, expected);

        let slots = slot_times(&tp("2020-06-21/18:00:05"), &tp("2020-06-21/18:00:25"));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_range_across_midnight() {
        let files = data_files(
            Path::new("/data"),
            CurrentSystem::Eics,
            &tp("2020-06-21/23:59:50"),
            &tp("2020-06-22/00:00:10"),
        );
        assert_eq!(
            files,
            vec![
                PathBuf::from("/data/EICS/2020/06/21/EICS20200621_235950.dat"),
                PathBuf::from("/data/EICS/2020/06/22/EICS20200622_000000.dat"),
            ]
        );
    }
}

//! Data access for EICS/SECS current files.
//!
//! Locates the per-time `.dat` files of a current system under a local data
//! root and reads them into typed sample frames.

pub mod error;
pub mod frame;
pub mod paths;
pub mod reader;

pub use error::{DataError, DataResult};
pub use frame::{max_abs, CurrentFrame, EicsSample, SecsSample};
pub use paths::{data_files, relative_path, slot_times, FILE_RESOLUTION_SECS};
pub use reader::{load_frame, parse_rows, read_data_file, read_data_files};

//! Filesystem adapters.

mod local;
pub mod replicate;

pub use local::{DIR_MODE, FILE_MODE, LocalFilesystem};
pub use replicate::{ReplicateError, copy_dir, copy_file};

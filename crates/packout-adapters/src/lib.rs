//! Infrastructure adapters for packout.
//!
//! This crate implements the ports defined in `packout-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod pack_source;
pub mod prompt;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, copy_dir, copy_file};
pub use pack_source::LocalPackSource;
#[cfg(feature = "interactive")]
pub use prompt::DialoguerLineSource;
pub use prompt::ReaderLineSource;
pub use renderer::SimpleRenderer;

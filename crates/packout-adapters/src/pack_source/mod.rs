//! Pack source adapters.

mod local;

pub use local::{DEFAULT_REGISTRY, LocalPackSource, PackManifest};

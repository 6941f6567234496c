//! Core domain layer for packout.
//!
//! Pure logic with no I/O: render batches and their ordering, name
//! canonicalisation, the overwrite session, and diagnostic context.
//! Everything touching the filesystem or a terminal goes through the ports
//! in [`crate::application::ports`].

pub mod context;
pub mod error;
pub mod name;
pub mod pack;
pub mod render;
pub mod session;

pub use context::{
    CONTEXT_DEST_DIR, CONTEXT_DEST_FILE, CONTEXT_PACK_NAME, CONTEXT_PACK_PATH, CONTEXT_PACK_REF,
    CONTEXT_REGISTRY_NAME, ErrorContext,
};
pub use error::{DomainError, ErrorCategory};
pub use name::{NameStyle, TEMPLATE_SUFFIX, format_render_name};
pub use pack::{DEFAULT_REF, Pack, PackRequest, PackTemplate, RenderContext};
pub use render::{OUTPUT_TEMPLATE_NAME, OutputBatch, Render, RenderGroup, RenderOutput};
pub use session::Session;

//! Application layer for packout.
//!
//! This layer contains:
//! - **Services**: the render workflow and the pieces it is built from
//! - **Ports**: traits for the filesystem, terminal, and pack loading
//! - **Errors**: setup failures and per-render failures
//!
//! Rules about ordering and naming live in `crate::domain`; this layer only
//! drives them against the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ConfirmationGate, Decision, DispatchReport, FileMaterializer, OutputDispatcher, RenderRequest,
    RenderService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, LineSource, PackRenderer, PackSource, Presenter};

pub use error::{ApplicationError, RenderError, RenderErrorKind};

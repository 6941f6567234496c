//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `packout-adapters` implement
//! most of these; the CLI implements [`Presenter`].
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation and file writes
//!   - `LineSource`: overwrite prompt input
//!   - `Presenter`: terminal display and error reporting
//!   - `PackSource`: pack lookup and loading
//!   - `PackRenderer`: template rendering

pub mod output;

pub use output::{Filesystem, LineSource, PackRenderer, PackSource, Presenter};

//! Packout Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the packout render tool, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           packout-cli (CLI)             │
//! │   (OutputManager as Presenter, stdin)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  RenderService -> OutputDispatcher ->   │
//! │  FileMaterializer -> ConfirmationGate   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Filesystem, LineSource, Presenter,     │
//! │  PackSource, PackRenderer               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    packout-adapters (Infrastructure)    │
//! │ LocalFilesystem, LocalPackSource, etc.  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use packout_core::prelude::*;
//! # fn adapters() -> (Box<dyn PackSource>, Box<dyn PackRenderer>, Box<dyn Filesystem>) { todo!() }
//! # fn io() -> (Box<dyn LineSource>, Box<dyn Presenter>) { todo!() }
//!
//! let (source, renderer, filesystem) = adapters();
//! let (mut input, mut presenter) = io();
//!
//! let service = RenderService::new(source, renderer, filesystem);
//! let request = RenderRequest::new(PackRequest::new("./my-pack", None, None).unwrap());
//! service
//!     .render(&request, &mut Session::new(), input.as_mut(), presenter.as_mut())
//!     .unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DispatchReport, RenderError, RenderRequest, RenderService,
        ports::{Filesystem, LineSource, PackRenderer, PackSource, Presenter},
    };
    pub use crate::domain::{
        ErrorContext, NameStyle, OutputBatch, Pack, PackRequest, Render, RenderContext,
        RenderGroup, RenderOutput, Session,
    };
    pub use crate::error::{PackoutError, PackoutResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

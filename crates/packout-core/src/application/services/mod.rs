//! Application services - orchestrate use cases.
//!
//! The render workflow is layered: [`RenderService`] loads and renders a
//! pack, [`OutputDispatcher`] walks the resulting batch, [`FileMaterializer`]
//! writes each file and [`ConfirmationGate`] guards overwrites.

pub mod confirmation;
pub mod dispatcher;
pub mod materializer;
pub mod render_service;

#[cfg(test)]
mod test_support;

pub use confirmation::{ConfirmationGate, Decision, OVERWRITE_PROMPT};
pub use dispatcher::{DispatchReport, FILE_ERROR_MESSAGE, OutputDispatcher};
pub use materializer::FileMaterializer;
pub use render_service::{OUTPUT_TEMPLATE_ERROR_MESSAGE, RenderRequest, RenderService};

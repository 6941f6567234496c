//! Overwrite confirmation.
//!
//! Decides whether an existing destination may be replaced. The prompt is an
//! explicit state machine over an injected [`LineSource`]:
//!
//! ```text
//! AwaitingInput --y--> Approved
//!               --n--> Declined
//!               --a--> AutoApproved   (session escalates, irreversibly)
//!               --?--> AwaitingInput  (re-prompt)
//!               --read error--> Cancelled
//! ```

use std::path::Path;

use tracing::debug;

use crate::application::RenderError;
use crate::application::ports::{Filesystem, LineSource};
use crate::domain::Session;

/// Prompt shown when a destination file already exists.
pub const OVERWRITE_PROMPT: &str = "Output file exists, overwrite? [y/n/a]";

/// Terminal state of a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to overwrite, or the user answered `y`.
    Approved,
    /// Non-interactive session, or the user answered `n`.
    Declined,
    /// The session already approves everything, or the user answered `a`.
    AutoApproved,
}

impl Decision {
    pub fn allows_write(self) -> bool {
        !matches!(self, Self::Declined)
    }
}

enum PromptState {
    AwaitingInput,
    Finished(Decision),
}

/// Map one line of input to a decision; `None` means ask again.
fn parse_answer(line: &str) -> Option<Decision> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" => Some(Decision::Approved),
        "n" => Some(Decision::Declined),
        "a" => Some(Decision::AutoApproved),
        _ => None,
    }
}

/// Gatekeeper for overwriting existing files.
pub struct ConfirmationGate<'a> {
    filesystem: &'a dyn Filesystem,
    input: &'a mut dyn LineSource,
}

impl<'a> ConfirmationGate<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, input: &'a mut dyn LineSource) -> Self {
        Self { filesystem, input }
    }

    /// Decide whether `path` may be written.
    ///
    /// Evaluated in order: standing session approval, absent destination,
    /// non-interactive decline, then the prompt loop. There is no timeout on
    /// the prompt. A failed read returns [`RenderError::Cancelled`].
    pub fn confirm(
        &mut self,
        path: &Path,
        session: &mut Session,
        interactive: bool,
    ) -> Result<Decision, RenderError> {
        if session.is_auto_approved() {
            return Ok(Decision::AutoApproved);
        }

        if !self.filesystem.exists(path) {
            return Ok(Decision::Approved);
        }

        if !interactive {
            debug!(path = %path.display(), "destination exists, not prompting");
            return Ok(Decision::Declined);
        }

        let mut state = PromptState::AwaitingInput;
        loop {
            state = match state {
                PromptState::AwaitingInput => {
                    let line = self
                        .input
                        .read_line(OVERWRITE_PROMPT)
                        .map_err(|source| RenderError::Cancelled { source })?;
                    match parse_answer(&line) {
                        Some(decision) => PromptState::Finished(decision),
                        None => {
                            debug!(answer = %line.trim(), "unrecognised answer, asking again");
                            PromptState::AwaitingInput
                        }
                    }
                }
                PromptState::Finished(decision) => {
                    if decision == Decision::AutoApproved {
                        session.approve_all();
                    }
                    return Ok(decision);
                }
            };
        }
    }
}

//! Per-invocation overwrite session.

/// State shared by every overwrite decision within one invocation.
///
/// Invariant: `auto_approve_all` only ever moves from `false` to `true`.
/// There is no way to clear it; a new invocation starts a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    auto_approve_all: bool,
}

impl Session {
    /// A fresh session with no standing approval.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session pre-seeded from `--auto-approve` (or config).
    pub fn with_auto_approve(auto_approve: bool) -> Self {
        Self {
            auto_approve_all: auto_approve,
        }
    }

    pub fn is_auto_approved(&self) -> bool {
        self.auto_approve_all
    }

    /// Approve every remaining overwrite. Irreversible.
    pub fn approve_all(&mut self) {
        self.auto_approve_all = true;
    }
}

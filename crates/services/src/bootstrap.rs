//! Startup sequencing against document readiness.

use std::cell::Cell;

/// Loading state reported by the document (`document.readyState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentReadiness {
    Loading,
    Interactive,
    Complete,
}

impl DocumentReadiness {
    /// Map a `readyState` string. Anything other than `loading` counts as
    /// parsed enough to annotate.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "loading" => Self::Loading,
            "interactive" => Self::Interactive,
            _ => Self::Complete,
        }
    }

    #[must_use]
    pub fn is_ready(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Pending,
    Ready,
}

/// What the caller must do after a bootstrapper transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStep {
    /// Register a one-shot readiness listener and call
    /// [`Bootstrapper::document_ready`] from it.
    Defer,
    /// Run the one-time initialization now.
    Initialize,
    /// Nothing to do; initialization already ran.
    Idle,
}

/// Two-state startup machine. Initialization is requested exactly once.
#[derive(Debug)]
pub struct Bootstrapper {
    state: Cell<BootState>,
}

impl Bootstrapper {
    /// Enter the machine with the document's current readiness.
    #[must_use]
    pub fn enter(readiness: DocumentReadiness) -> (Self, BootStep) {
        if readiness.is_ready() {
            (Self::with_state(BootState::Ready), BootStep::Initialize)
        } else {
            (Self::with_state(BootState::Pending), BootStep::Defer)
        }
    }

    fn with_state(state: BootState) -> Self {
        Self {
            state: Cell::new(state),
        }
    }

    #[must_use]
    pub fn state(&self) -> BootState {
        self.state.get()
    }

    /// Readiness continuation. Only the first call from `Pending` initializes.
    pub fn document_ready(&self) -> BootStep {
        match self.state.replace(BootState::Ready) {
            BootState::Pending => BootStep::Initialize,
            BootState::Ready => BootStep::Idle,
        }
    }
}

#![forbid(unsafe_code)]

pub mod annotator;
pub mod bootstrap;
pub mod error;
pub mod memory;
pub mod page;
pub mod progress;
pub mod reset;
pub mod toggle;
pub mod tracker;

pub use annotator::Annotation;
pub use bootstrap::{BootState, BootStep, Bootstrapper, DocumentReadiness};
pub use error::TrackerError;
pub use memory::{MemoryPage, ScriptedDialogs};
pub use page::{Dialogs, Page};
pub use progress::{ProgressReport, SectionProgress};
pub use reset::ResetOutcome;
pub use toggle::ToggleOutcome;
pub use tracker::{Initialized, ProgressTracker};

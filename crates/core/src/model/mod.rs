mod completion;
mod ids;
mod progress;

pub use completion::CompletionSet;
pub use ids::{CHECKBOX_ID_PREFIX, IdError, ResourceId};
pub use progress::{Progress, percentage};

#![forbid(unsafe_code)]

pub mod dialogs;
pub mod events;
pub mod markup;
pub mod page;

pub use dialogs::WindowDialogs;
pub use events::{WebTracker, bind_initialized};
pub use page::WebPage;

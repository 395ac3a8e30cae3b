// Data Models
pub mod entry;
pub mod listing;
pub mod state;

pub use entry::{Entry, Role, RowValue};
pub use listing::DirectoryListing;
pub use state::{ErrorKind, ModelEvent, ModelObserver, ModelState};

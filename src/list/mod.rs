//! Newline-delimited list files kept current by a background watcher.
//!
//! [`loader`] reads and parses one file; [`store`] owns the file watch,
//! debounce timer, and the atomically replaced [`ListSnapshot`](crate::models::list::ListSnapshot).

pub mod loader;
pub mod store;

#![forbid(unsafe_code)]

//! `extension-gate` decides whether an editor extension may run, based on
//! three newline-delimited list files that are reloaded as they change.

pub mod config;
pub mod errors;
pub mod list;
pub mod models;
pub mod policy;

pub use config::GateConfig;
pub use errors::{GateError, Result};
pub use models::extension::ExtensionId;
pub use policy::ExtensionPolicy;

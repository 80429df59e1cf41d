//! Domain model module declarations.

pub mod extension;
pub mod list;

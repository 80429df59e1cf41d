//! Extension permission policy.
//!
//! [`evaluator`] holds the pure decision over three list snapshots;
//! [`gate`] owns the live list stores and answers queries against whatever
//! they currently hold.

pub mod evaluator;
pub mod gate;

pub use gate::ExtensionPolicy;

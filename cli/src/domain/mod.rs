//! Domain layer — pure types, paths, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`. All
//! functions are synchronous and take data in, returning data out.

pub mod accounts;
pub mod descriptor;
pub mod error;
pub mod paths;
pub mod target;

pub use accounts::LocalAccount;
pub use descriptor::{AgentDescriptor, LOGIN_WINDOW_SESSION};
pub use error::DescriptorError;

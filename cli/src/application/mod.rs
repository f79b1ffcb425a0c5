//! Application layer: orchestration services and the ports they depend on.
//!
//! This layer owns the install/remove workflows. It may import from
//! `domain` but never from `infra` or `output`; side effects arrive
//! through the port traits defined in [`ports`].

pub mod ports;
pub mod services;

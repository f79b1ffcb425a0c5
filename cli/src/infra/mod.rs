//! Infrastructure layer: adapters that touch the outside world.
//!
//! Implements the `application::ports` traits over real processes and
//! the filesystem. May import from `domain` and `application`, never
//! from `commands` or `output`.

pub mod accounts;
pub mod command_runner;
pub mod launchctl;
pub mod records;

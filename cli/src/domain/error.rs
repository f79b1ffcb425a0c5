//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

/// Errors from descriptor validation.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Invalid agent label '{0}': must be a reverse-DNS name like com.example.watcher")]
    InvalidLabel(String),
}

//! Marquee CLI library crate.
//!
//! The install and remove bins stay thin; everything they call lives in
//! these modules so integration tests can drive the same paths.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod output;

//! Common test utilities for nagstage integration tests.
//!
//! This module provides:
//! - `TestEnv`: temp staging/production/source trees plus a matching `Config`
//! - Fixtures: deployment documents and host files
//! - Helpers for fake executables and for running the CLI

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;

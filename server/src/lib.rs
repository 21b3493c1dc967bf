//! Nexora site server library.
//!
//! This module exposes the server components for use in tests and binaries.

pub mod config;
pub mod http;
pub mod submissions;

//! Core domain types
//!
//! This module contains the core domain structures used across Vigil crates.
//! These types represent what the remote job service reports about a job and
//! its log output, and are shared between the client and the monitor.

pub mod job;
pub mod log;

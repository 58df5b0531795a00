//! Vigil Core
//!
//! Core types and abstractions for the Vigil job-monitoring system.
//!
//! This crate contains:
//! - Domain types: Core business entities (job snapshots, log events, etc.)
//! - DTOs: Data transfer objects for talking to the remote job service

pub mod domain;
pub mod dto;

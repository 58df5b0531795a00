//! Data Transfer Objects for the remote job-service API
//!
//! This module contains DTOs used on the wire between Vigil and the remote
//! job-execution service. DTOs are lightweight representations of domain
//! entities optimized for network transfer.

pub mod job;
pub mod log;

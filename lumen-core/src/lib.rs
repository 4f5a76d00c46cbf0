//! Lumen Core
//!
//! Core types and abstractions for the Lumen job-tracking system.
//!
//! This crate contains:
//! - Domain types: Job handles, states, snapshots and the pure poll
//!   transition function
//! - DTOs: Wire representations of the workspace API responses

pub mod domain;
pub mod dto;

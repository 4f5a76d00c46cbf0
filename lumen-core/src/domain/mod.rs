//! Core domain types
//!
//! This module contains the domain structures shared across Lumen crates.
//! They describe the client-side view of a remote batch job: its handle,
//! its tracked state, and the per-tick status snapshots handed to the
//! display layer.

pub mod job;
pub mod transition;

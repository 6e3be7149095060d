//! # Workflows Module
//!
//! High-level entry points that run complete design studies on top of the
//! [`engine`](crate::engine).
//!
//! ## Overview
//!
//! Each workflow validates its inputs, runs one or more sweeps with phase
//! reporting, and returns the raw sweep output together with the ranked
//! feasible designs. Nothing here renders or prints; presentation is left to
//! the caller.
//!
//! ## Architecture
//!
//! - **Survey Workflow** ([`survey`]) - Fixed-`a'` sweep compared against a full 2D sweep
//! - **Search Workflow** ([`search`]) - Broad 2D search returning the best feasible designs

pub mod search;
pub mod survey;

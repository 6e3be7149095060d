//! # Engine Module
//!
//! This module evaluates trap designs over grids of electrode geometries and
//! drive frequencies, classifying every operating point against a target
//! specification.
//!
//! ## Overview
//!
//! For each geometry the engine inverts the secular-frequency relation to
//! find the RF amplitude that reaches the target at every candidate drive
//! frequency, then computes the resulting trap depth and checks voltage, q
//! and depth limits. Sweeps collect these records in grid order; ranking and
//! summaries are derived from them without modifying the sweep output.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Target specification, drive frequency range, engine settings
//! - **Inverse Solve** ([`solver`]) - Closed-form required amplitude per drive frequency
//! - **Classification** ([`candidate`]) - Feasibility flags and evaluated design points
//! - **Sweeps** ([`sweep`]) - Fixed-`a'`, full 2D and constant-height grid traversal
//! - **Ranking** ([`ranking`]) - Feasible subsets, top-N selection, sweep summaries
//! - **Drive Scans** ([`scan`]) - Forward evaluation with one drive quantity held fixed
//! - **Export** ([`export`]) - CSV output of evaluated candidates
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! ## Key Capabilities
//!
//! - **Closed-form evaluation** with no iteration or root finding
//! - **Parallel sweeps** behind the `parallel` feature, with output identical to the sequential run
//! - **Fail-fast validation** of specifications and grids before any work is done

pub mod candidate;
pub mod config;
pub mod error;
pub mod export;
pub mod progress;
pub mod ranking;
pub mod scan;
pub mod solver;
pub mod sweep;

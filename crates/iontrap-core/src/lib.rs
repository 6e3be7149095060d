//! # Ion Trap Design Core Library
//!
//! A library for exploring the design space of surface-electrode RF Paul traps:
//! given an ion species and a target specification, it finds the electrode
//! geometries and drive parameters that reach the target secular frequency
//! within voltage, stability and depth limits.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless physics: constants, ion species,
//!   validated geometries, sample grids and the closed-form formulas for trap
//!   height, depth, Mathieu q and secular frequency.
//!
//! - **[`engine`]: The Logic Core.** The inverse voltage solve, feasibility
//!   classification, grid sweeps (optionally parallel), ranking, drive scans and
//!   CSV export.
//!
//! - **[`workflows`]: The Public API.** Complete studies built from sweeps,
//!   such as the fixed-versus-full geometry survey and the broad design search.

pub mod core;
pub mod engine;
pub mod workflows;

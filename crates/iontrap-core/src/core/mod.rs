//! # Core Module
//!
//! Stateless building blocks of the trap design engine: physical constants,
//! ion species, electrode geometry, sample grids and the closed-form trap
//! formulas.
//!
//! ## Architecture
//!
//! - **Constants** ([`constants`]) - Physical constants and unit scale factors
//! - **Species** ([`species`]) - Ion mass and charge, with a catalog of common species
//! - **Geometry** ([`geometry`]) - Validated `(a', b')` points, slot correction, constant-height contours
//! - **Grids** ([`grid`]) - Linear and stepped sample generation for sweeps
//! - **Formulas** ([`formulas`]) - Trap height, trap depth, Mathieu q and secular frequency
//!
//! Nothing in this module holds state; every function is deterministic in its
//! arguments.

pub mod constants;
pub mod formulas;
pub mod geometry;
pub mod grid;
pub mod species;

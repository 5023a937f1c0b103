//! # APR Restraints Core Library
//!
//! Generates restraint definitions for attach-pull-release (APR) free-energy simulations.
//! Given a list of geometric restraints (distances, angles and torsions between single atoms or
//! centroid groups) and the windows of a perturbation schedule, the library either builds native
//! force terms for an MD engine or writes PLUMED input files, one per window.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Restraint`, `WindowId`, `Structure`),
//!   structure file readers, unit conversions and pure potential-energy functions.
//!
//! - **[`engine`]: The Emitters.** The restraint classifier shared by both front ends, the
//!   native-force emitter working against an injected [`engine::native::ForceContainer`], and
//!   the PLUMED text emitter with its per-window deduplication tables.
//!
//! - **[`workflows`]: The Public API.** Whole-run procedures that validate a restraint list,
//!   derive the window list and drive the emitters across every window.

pub mod core;
pub mod engine;
pub mod workflows;

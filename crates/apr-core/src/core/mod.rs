//! # Core Module
//!
//! The data model and the stateless building blocks shared by both restraint emitters.
//!
//! - **Restraint Representation** ([`models`]) - Restraints, APR windows and loaded structures
//! - **Potentials and Units** ([`forcefield`]) - Energy functions and engine unit conversions
//! - **File I/O** ([`io`]) - Structure readers and restraint definition files
//! - **Geometry** ([`utils`]) - Distances, angles, torsions and centroids

pub mod forcefield;
pub mod io;
pub mod models;
pub mod utils;

//! # Workflows Module
//!
//! Whole-run entry points built on the engine.
//!
//! - **Prepare Workflow** ([`prepare`]) - validates a restraint list, derives its windows, and
//!   writes the PLUMED restraint file of every window, optionally with placeholder-particle
//!   restraints appended.

pub mod prepare;

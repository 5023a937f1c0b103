//! Data structures describing restraints, APR windows and molecular structures.

pub mod restraint;
pub mod structure;
pub mod window;

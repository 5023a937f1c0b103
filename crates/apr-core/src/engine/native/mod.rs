//! Restraints as force terms for an MD engine.
//!
//! Terms are appended to any [`ForceContainer`]; [`ForceSystem`] is the in-memory container used
//! to inspect and evaluate them.

mod container;
mod emitter;
mod force;

pub use container::{ForceContainer, ForceId, ForceSystem};
pub use emitter::{
    DEFAULT_POSITIONAL_FORCE_GROUP, POSITIONAL_FORCE_CONSTANT, apply_positional_restraints,
    apply_restraint, apply_restraints,
};
pub use force::{
    AngleForce, BondForce, CentroidBondForce, CustomForce, EnergyForm, ExternalForce, GroupHandle,
    TorsionForce,
};

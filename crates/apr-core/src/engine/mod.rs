//! # Engine Module
//!
//! The two restraint emitters and the classifier they share.
//!
//! - [`classify`] decides, per restraint and phase, which potential shape applies.
//! - [`native`] turns restraints into force terms appended to an injected
//!   [`native::ForceContainer`].
//! - [`plumed`] writes one PLUMED input file per window, deduplicating collective variables and
//!   centroid groups within the window.

pub mod classify;
pub mod error;
pub mod native;
pub mod plumed;
pub mod progress;

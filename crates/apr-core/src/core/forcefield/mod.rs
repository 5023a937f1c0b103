//! # Force Field Module
//!
//! Unit conversions between restraint definitions and MD-engine native units, and the pure
//! energy functions behind every restraint potential shape.
//!
//! Restraint schedules are written in kcal/mol, Angstroms and degrees with force constants in
//! the legacy `k (x - x0)²` convention. Native force terms are built in kJ/mol, nanometres and
//! radians ([`units`]); the functions in [`potentials`] evaluate the resulting terms.

pub mod potentials;
pub mod units;

//! Conversions from restraint-definition units to MD-engine native units.

use std::f64::consts::PI;

pub const KCAL_TO_KJ: f64 = 4.184;
pub const ANGSTROM_TO_NM: f64 = 0.1;
pub const DEG_TO_RAD: f64 = PI / 180.0;

#[inline]
pub fn angstrom_to_nm(length: f64) -> f64 {
    length * ANGSTROM_TO_NM
}

#[inline]
pub fn degrees_to_radians(angle: f64) -> f64 {
    angle * DEG_TO_RAD
}

/// kcal/mol/Å² to kJ/mol/nm².
#[inline]
pub fn distance_force_constant(k: f64) -> f64 {
    k * KCAL_TO_KJ / (ANGSTROM_TO_NM * ANGSTROM_TO_NM)
}

/// kcal/mol/rad² to kJ/mol/rad².
#[inline]
pub fn angular_force_constant(k: f64) -> f64 {
    k * KCAL_TO_KJ
}

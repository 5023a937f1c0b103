use super::container::ForceContainer;
use super::force::{
    AngleForce, BondForce, CentroidBondForce, CustomForce, EnergyForm, ExternalForce, TorsionForce,
};
use crate::core::forcefield::units::{
    ANGSTROM_TO_NM, angstrom_to_nm, angular_force_constant, degrees_to_radians,
    distance_force_constant,
};
use crate::core::io::source::StructureSource;
use crate::core::models::restraint::Restraint;
use crate::core::models::window::{Phase, WindowId};
use crate::engine::classify::{FLAT_BOTTOM_ANGLE_REFERENCE, RestraintShape, classify};
use crate::engine::error::EngineError;
use tracing::{debug, trace};

/// Spring constant of the placeholder-particle tethers, in kcal/mol/Å².
pub const POSITIONAL_FORCE_CONSTANT: f64 = 50.0;

/// Force group the placeholder-particle tethers are placed in unless told otherwise.
pub const DEFAULT_POSITIONAL_FORCE_GROUP: u32 = 15;

/// Appends the force term for `restraint` in one window of `phase` to `container`.
///
/// Atom indices are used as absolute, 0-based particle indices. Targets are converted from
/// Angstroms and degrees, force constants from kcal/mol/Å² and kcal/mol/rad².
///
/// Returns `Ok(None)` without touching the container when the restraint is inactive in `phase`
/// or its window values are undefined.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedShape`] for angles and torsions over centroid groups.
/// Nothing is added to the container in that case.
pub fn apply_restraint<C: ForceContainer>(
    container: &mut C,
    restraint: &Restraint,
    phase: Phase,
    window: usize,
    force_group: Option<u32>,
) -> Result<Option<C::Handle>, EngineError> {
    let shape = classify(restraint, phase)?;
    if shape == RestraintShape::Inactive {
        trace!("Flat-bottom restraint is inactive during {}", phase);
        return Ok(None);
    }

    let values = restraint.window_values(phase, window);
    let Some(k) = values.force_constant else {
        debug!("No force constant for {} window {}; skipping restraint", phase, window);
        return Ok(None);
    };
    // The flat-bottom angle uses a fixed reference and needs no target.
    let target = match (&shape, values.target) {
        (RestraintShape::FlatBottomAngle(_), _) => FLAT_BOTTOM_ANGLE_REFERENCE,
        (_, Some(target)) => target,
        (_, None) => {
            debug!("No target for {} window {}; skipping restraint", phase, window);
            return Ok(None);
        }
    };

    let Some(force) = build_force(shape, target, k) else {
        return Ok(None);
    };
    let handle = container.add_force(force);
    if let Some(group) = force_group {
        container.set_force_group(handle, group);
    }
    Ok(Some(handle))
}

fn build_force(shape: RestraintShape<'_>, target: f64, k: f64) -> Option<CustomForce> {
    let bond = |form, particles| {
        CustomForce::Bond(BondForce {
            form,
            particles,
            k: distance_force_constant(k),
            r0: angstrom_to_nm(target),
        })
    };
    let angle = |form, particles| {
        CustomForce::Angle(AngleForce {
            form,
            particles,
            k: angular_force_constant(k),
            theta0: degrees_to_radians(target),
        })
    };

    let force = match shape {
        RestraintShape::Inactive => return None,
        RestraintShape::FlatBottomAngle(particles) => angle(EnergyForm::LowerWall, particles),
        RestraintShape::FlatBottomDistance(particles) => bond(EnergyForm::UpperWall, particles),
        RestraintShape::Distance(particles) => bond(EnergyForm::Harmonic, particles),
        RestraintShape::Angle(particles) => angle(EnergyForm::Harmonic, particles),
        RestraintShape::Torsion(particles) => CustomForce::Torsion(TorsionForce {
            particles,
            k: angular_force_constant(k),
            theta0: degrees_to_radians(target),
        }),
        RestraintShape::CentroidDistance([first, second]) => {
            let mut force =
                CentroidBondForce::new(distance_force_constant(k), angstrom_to_nm(target));
            let g1 = force.add_group(first);
            let g2 = force.add_group(second);
            force.add_bond([g1, g2]);
            CustomForce::CentroidBond(force)
        }
    };
    Some(force)
}

/// Applies every restraint for `window` and returns the handles of the added terms.
///
/// Stops at the first unsupported restraint; terms added before it stay in the container.
pub fn apply_restraints<C: ForceContainer>(
    container: &mut C,
    restraints: &[Restraint],
    window: WindowId,
    force_group: Option<u32>,
) -> Result<Vec<C::Handle>, EngineError> {
    let mut handles = Vec::with_capacity(restraints.len());
    for restraint in restraints {
        if let Some(handle) =
            apply_restraint(container, restraint, window.phase, window.index, force_group)?
        {
            handles.push(handle);
        }
    }
    debug!("Added {} restraint forces for window {}", handles.len(), window);
    Ok(handles)
}

/// Tethers every placeholder particle (atom name `DUM`) to its current position.
///
/// Each particle gets its own three-axis harmonic term with a spring constant of
/// [`POSITIONAL_FORCE_CONSTANT`] in native units, tagged with `force_group`. The restraint list
/// is not consulted.
pub fn apply_positional_restraints<C: ForceContainer>(
    container: &mut C,
    source: StructureSource<'_>,
    force_group: u32,
) -> Result<Vec<C::Handle>, EngineError> {
    let structure = source.resolve()?;
    let k = distance_force_constant(POSITIONAL_FORCE_CONSTANT);

    let handles: Vec<C::Handle> = structure
        .placeholder_atoms()
        .map(|(index, atom)| {
            let handle = container.add_force(CustomForce::External(ExternalForce {
                particle: index,
                k,
                x0: atom.position * ANGSTROM_TO_NM,
            }));
            container.set_force_group(handle, force_group);
            handle
        })
        .collect();

    debug!("Tethered {} placeholder particles", handles.len());
    Ok(handles)
}

use crate::core::forcefield::potentials;
use crate::core::forcefield::units::ANGSTROM_TO_NM;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use crate::engine::error::EngineError;
use nalgebra::Point3;

/// The functional form of a custom force term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyForm {
    /// `k (x - x0)²`
    Harmonic,
    /// `step(x - x0) k (x - x0)²`
    UpperWall,
    /// `step(-(x - x0)) k (x - x0)²`
    LowerWall,
    /// `k min(|Δ|, |Δ + 2π|, |Δ - 2π|)²`
    PeriodicHarmonic,
}

impl EnergyForm {
    /// The engine-side energy expression in terms of the collective variable `x` and the
    /// per-term parameters `k` and `x0`.
    pub fn expression(self, x: &str, x0: &str) -> String {
        match self {
            EnergyForm::Harmonic => format!("k * ({x} - {x0})^2"),
            EnergyForm::UpperWall => format!("step(({x} - {x0})) * k * ({x} - {x0})^2"),
            EnergyForm::LowerWall => format!("step(-({x} - {x0})) * k * ({x} - {x0})^2"),
            EnergyForm::PeriodicHarmonic => {
                let two_pi = 2.0 * std::f64::consts::PI;
                format!(
                    "k * min(min(abs({x} - {x0}), abs({x} - {x0} + {two_pi})), abs({x} - {x0} - {two_pi}))^2"
                )
            }
        }
    }

    pub fn evaluate(self, x: f64, x0: f64, k: f64) -> f64 {
        match self {
            EnergyForm::Harmonic => potentials::harmonic(x, x0, k),
            EnergyForm::UpperWall => potentials::upper_wall(x, x0, k),
            EnergyForm::LowerWall => potentials::lower_wall(x, x0, k),
            EnergyForm::PeriodicHarmonic => potentials::periodic_harmonic(x, x0, k),
        }
    }
}

/// Handle of a particle group registered with a [`CentroidBondForce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(pub usize);

/// Distance term between two particles. `k` in kJ/mol/nm², `r0` in nm.
#[derive(Debug, Clone, PartialEq)]
pub struct BondForce {
    pub form: EnergyForm,
    pub particles: [usize; 2],
    pub k: f64,
    pub r0: f64,
}

/// Angle term over three particles. `k` in kJ/mol/rad², `theta0` in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleForce {
    pub form: EnergyForm,
    pub particles: [usize; 3],
    pub k: f64,
    pub theta0: f64,
}

/// Torsion term over four particles with minimum-image wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TorsionForce {
    pub particles: [usize; 4],
    pub k: f64,
    pub theta0: f64,
}

/// Harmonic distance between the centroids of two particle groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CentroidBondForce {
    groups: Vec<Vec<usize>>,
    bond: Option<[GroupHandle; 2]>,
    pub k: f64,
    pub r0: f64,
}

impl CentroidBondForce {
    pub fn new(k: f64, r0: f64) -> Self {
        Self {
            k,
            r0,
            ..Self::default()
        }
    }

    /// Registers a particle group and returns its handle.
    pub fn add_group(&mut self, particles: &[usize]) -> GroupHandle {
        self.groups.push(particles.to_vec());
        GroupHandle(self.groups.len() - 1)
    }

    pub fn add_bond(&mut self, groups: [GroupHandle; 2]) {
        self.bond = Some(groups);
    }

    pub fn group(&self, handle: GroupHandle) -> Option<&[usize]> {
        self.groups.get(handle.0).map(Vec::as_slice)
    }

    pub fn bond(&self) -> Option<[GroupHandle; 2]> {
        self.bond
    }
}

/// Harmonic tether of one particle to a fixed point. `k` in kJ/mol/nm², `x0` in nm.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalForce {
    pub particle: usize,
    pub k: f64,
    pub x0: Point3<f64>,
}

/// A force term that can be appended to a [`super::ForceContainer`].
#[derive(Debug, Clone, PartialEq)]
pub enum CustomForce {
    Bond(BondForce),
    Angle(AngleForce),
    Torsion(TorsionForce),
    CentroidBond(CentroidBondForce),
    External(ExternalForce),
}

impl CustomForce {
    pub fn energy_expression(&self) -> String {
        match self {
            CustomForce::Bond(f) => f.form.expression("r", "r_0"),
            CustomForce::Angle(f) => f.form.expression("theta", "theta_0"),
            CustomForce::Torsion(_) => {
                EnergyForm::PeriodicHarmonic.expression("theta", "theta_0")
            }
            CustomForce::CentroidBond(_) => {
                EnergyForm::Harmonic.expression("distance(g1, g2)", "r_0")
            }
            CustomForce::External(_) => "k * ((x-x0)^2 + (y-y0)^2 + (z-z0)^2)".to_string(),
        }
    }

    /// Evaluates the term in kJ/mol at the coordinates of `structure` (Angstroms).
    pub fn energy(&self, structure: &Structure) -> Result<f64, EngineError> {
        let pos = |index: usize| -> Result<Point3<f64>, EngineError> {
            structure
                .position(index)
                .map(|p| p * ANGSTROM_TO_NM)
                .ok_or(EngineError::AtomOutOfRange {
                    index,
                    atoms: structure.len(),
                })
        };

        let energy = match self {
            CustomForce::Bond(f) => {
                let r = geometry::distance(&pos(f.particles[0])?, &pos(f.particles[1])?);
                f.form.evaluate(r, f.r0, f.k)
            }
            CustomForce::Angle(f) => {
                let [a, b, c] = f.particles;
                let theta = geometry::angle(&pos(a)?, &pos(b)?, &pos(c)?);
                f.form.evaluate(theta, f.theta0, f.k)
            }
            CustomForce::Torsion(f) => {
                let [a, b, c, d] = f.particles;
                let theta = geometry::dihedral(&pos(a)?, &pos(b)?, &pos(c)?, &pos(d)?);
                potentials::periodic_harmonic(theta, f.theta0, f.k)
            }
            CustomForce::CentroidBond(f) => {
                let [g1, g2] = f.bond.ok_or(EngineError::IncompleteCentroidForce)?;
                let center = |handle: GroupHandle| -> Result<Point3<f64>, EngineError> {
                    let members = f.group(handle).ok_or(EngineError::IncompleteCentroidForce)?;
                    let points = members
                        .iter()
                        .map(|&i| pos(i))
                        .collect::<Result<Vec<_>, _>>()?;
                    geometry::centroid(&points).ok_or(EngineError::IncompleteCentroidForce)
                };
                let r = geometry::distance(&center(g1)?, &center(g2)?);
                potentials::harmonic(r, f.r0, f.k)
            }
            CustomForce::External(f) => {
                let x = pos(f.particle)?;
                f.k * (x - f.x0).norm_squared()
            }
        };

        Ok(energy)
    }
}

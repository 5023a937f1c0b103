use super::error::EngineError;
use crate::core::models::restraint::{Geometry, Operand, Restraint};
use crate::core::models::window::Phase;

/// Reference angle of the flat-bottom angle restraint, in degrees. The restraint switches on
/// once the angle closes below it, independent of the scheduled target.
pub const FLAT_BOTTOM_ANGLE_REFERENCE: f64 = 91.0;

/// The potential a restraint contributes in a given phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestraintShape<'a> {
    /// Flat-bottom restraint outside the attach phase; contributes nothing.
    Inactive,
    /// One-sided quadratic on an angle, active below [`FLAT_BOTTOM_ANGLE_REFERENCE`].
    FlatBottomAngle([usize; 3]),
    /// One-sided quadratic on a distance, active beyond the window target.
    FlatBottomDistance([usize; 2]),
    Distance([usize; 2]),
    CentroidDistance([&'a [usize]; 2]),
    Angle([usize; 3]),
    /// Harmonic on a torsion with minimum-image wrapping.
    Torsion([usize; 4]),
}

/// Selects the potential shape for `restraint` in `phase`.
///
/// Flat-bottom restraints are only active during the attach phase and are evaluated first. They
/// act on the first atom of each operand: two operands give a distance wall, three or more an
/// angle wall over the first three. Distances between groups use centroids; harmonic angles and
/// torsions must involve single atoms.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedShape`] for harmonic angles or torsions involving a centroid
/// group.
pub fn classify(restraint: &Restraint, phase: Phase) -> Result<RestraintShape<'_>, EngineError> {
    let geometry = restraint.geometry();

    if restraint.is_flat_bottom() {
        if phase != Phase::Attach {
            return Ok(RestraintShape::Inactive);
        }
        return Ok(match geometry {
            Geometry::Distance(ops) => RestraintShape::FlatBottomDistance(atoms(ops)),
            Geometry::Angle(ops) => RestraintShape::FlatBottomAngle(atoms(ops)),
            Geometry::Torsion([a, b, c, _]) => {
                RestraintShape::FlatBottomAngle([a.first(), b.first(), c.first()])
            }
        });
    }

    match geometry {
        Geometry::Distance([a, b]) if !geometry.has_group() => {
            Ok(RestraintShape::Distance([a.first(), b.first()]))
        }
        Geometry::Distance([a, b]) => {
            Ok(RestraintShape::CentroidDistance([a.indices(), b.indices()]))
        }
        Geometry::Angle(ops) if !geometry.has_group() => Ok(RestraintShape::Angle(atoms(ops))),
        Geometry::Torsion(ops) if !geometry.has_group() => Ok(RestraintShape::Torsion(atoms(ops))),
        Geometry::Angle(_) | Geometry::Torsion(_) => Err(EngineError::UnsupportedShape {
            geometry: geometry.kind(),
            reason: "between centroid groups are not supported",
        }),
    }
}

fn atoms<const N: usize>(ops: &[Operand; N]) -> [usize; N] {
    std::array::from_fn(|i| ops[i].first())
}

/// The PLUMED bias action used for a restraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasKind {
    /// Symmetric harmonic bias.
    Restraint,
    /// One-sided bias active above the target.
    UpperWalls,
    /// One-sided bias active below the target.
    LowerWalls,
}

impl BiasKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BiasKind::Restraint => "RESTRAINT",
            BiasKind::UpperWalls => "UPPER_WALLS",
            BiasKind::LowerWalls => "LOWER_WALLS",
        }
    }
}

/// Selects the bias action for the text emitter, mirroring the flat-bottom shapes of
/// [`classify`]: flat-bottom distances push back beyond the target, flat-bottom angles and
/// torsions below it.
pub fn bias_kind(restraint: &Restraint) -> BiasKind {
    match (restraint.is_flat_bottom(), restraint.geometry()) {
        (false, _) => BiasKind::Restraint,
        (true, Geometry::Distance(_)) => BiasKind::UpperWalls,
        (true, Geometry::Angle(_) | Geometry::Torsion(_)) => BiasKind::LowerWalls,
    }
}

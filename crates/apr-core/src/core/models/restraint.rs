use super::window::Phase;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RestraintError {
    #[error("Missing required atom index list: {0}")]
    MissingIndex(&'static str),

    #[error("Atom index list {0} is empty")]
    EmptyIndex(&'static str),

    #[error("index4 is set but index3 is not; a torsion needs four consecutive operands")]
    TorsionWithoutAngle,

    #[error("{slot} holds {count} atoms but is not flagged as a centroid group")]
    UngroupedMultiAtom { slot: &'static str, count: usize },
}

/// A single restraint endpoint: one atom, or the centroid of a group of atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Atom(usize),
    Group(Vec<usize>),
}

impl Operand {
    pub fn is_group(&self) -> bool {
        matches!(self, Operand::Group(_))
    }

    /// The atom indices behind this operand, in input order.
    pub fn indices(&self) -> &[usize] {
        match self {
            Operand::Atom(index) => std::slice::from_ref(index),
            Operand::Group(indices) => indices,
        }
    }

    /// The first atom of the operand; the atom itself for single-atom operands.
    pub fn first(&self) -> usize {
        self.indices()[0]
    }
}

/// The geometric collective variable a restraint acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Distance([Operand; 2]),
    Angle([Operand; 3]),
    Torsion([Operand; 4]),
}

impl Geometry {
    pub fn operands(&self) -> &[Operand] {
        match self {
            Geometry::Distance(ops) => ops,
            Geometry::Angle(ops) => ops,
            Geometry::Torsion(ops) => ops,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.operands().len()
    }

    pub fn has_group(&self) -> bool {
        self.operands().iter().any(Operand::is_group)
    }

    pub fn mask2(&self) -> bool {
        true
    }

    pub fn mask3(&self) -> bool {
        matches!(self, Geometry::Angle(_) | Geometry::Torsion(_))
    }

    pub fn mask4(&self) -> bool {
        matches!(self, Geometry::Torsion(_))
    }

    /// Whether the target value is an angle in degrees rather than a distance in Angstroms.
    pub fn is_angular(&self) -> bool {
        self.mask3()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Distance(_) => "distance",
            Geometry::Angle(_) => "angle",
            Geometry::Torsion(_) => "torsion",
        }
    }
}

/// Target and force constant of a restraint for one window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowValues {
    pub target: Option<f64>,
    pub force_constant: Option<f64>,
}

/// Per-window targets and force constants for one phase.
///
/// Targets are in Angstroms for distances and degrees for angles and torsions. Force constants
/// are in kcal/mol/Å² or kcal/mol/rad² following the legacy `k (x - x0)²` convention.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseSchedule {
    pub targets: Vec<Option<f64>>,
    pub force_constants: Vec<Option<f64>>,
}

impl PhaseSchedule {
    pub fn new(targets: Vec<Option<f64>>, force_constants: Vec<Option<f64>>) -> Self {
        Self {
            targets,
            force_constants,
        }
    }

    /// A schedule holding fully defined values for every window.
    pub fn from_values(targets: &[f64], force_constants: &[f64]) -> Self {
        Self {
            targets: targets.iter().copied().map(Some).collect(),
            force_constants: force_constants.iter().copied().map(Some).collect(),
        }
    }

    /// A schedule with the same target and force constant in `windows` windows.
    pub fn constant(target: f64, force_constant: f64, windows: usize) -> Self {
        Self::from_values(&vec![target; windows], &vec![force_constant; windows])
    }

    /// Number of windows this schedule covers.
    pub fn len(&self) -> usize {
        self.targets.len().max(self.force_constants.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn window(&self, window: usize) -> WindowValues {
        WindowValues {
            target: self.targets.get(window).copied().flatten(),
            force_constant: self.force_constants.get(window).copied().flatten(),
        }
    }
}

/// A validated APR restraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Restraint {
    geometry: Geometry,
    amber_index: bool,
    flat_bottom: bool,
    attach: Option<PhaseSchedule>,
    pull: Option<PhaseSchedule>,
    release: Option<PhaseSchedule>,
}

impl Restraint {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Whether the atom indices are already 1-based.
    pub fn amber_index(&self) -> bool {
        self.amber_index
    }

    pub fn is_flat_bottom(&self) -> bool {
        self.flat_bottom
    }

    pub fn schedule(&self, phase: Phase) -> Option<&PhaseSchedule> {
        match phase {
            Phase::Attach => self.attach.as_ref(),
            Phase::Pull => self.pull.as_ref(),
            Phase::Release => self.release.as_ref(),
        }
    }

    pub fn window_count(&self, phase: Phase) -> usize {
        self.schedule(phase).map_or(0, PhaseSchedule::len)
    }

    pub fn window_values(&self, phase: Phase, window: usize) -> WindowValues {
        self.schedule(phase)
            .map(|s| s.window(window))
            .unwrap_or_default()
    }

    /// Returns `(target, force_constant)` when both are defined for the window.
    pub fn values(&self, phase: Phase, window: usize) -> Option<(f64, f64)> {
        let values = self.window_values(phase, window);
        Some((values.target?, values.force_constant?))
    }
}

/// Builds a [`Restraint`] from up to four atom index lists and their group flags.
#[derive(Debug, Default, Clone)]
pub struct RestraintBuilder {
    indices: [Option<Vec<usize>>; 4],
    groups: [bool; 4],
    amber_index: bool,
    flat_bottom: bool,
    attach: Option<PhaseSchedule>,
    pull: Option<PhaseSchedule>,
    release: Option<PhaseSchedule>,
}

const SLOT_NAMES: [&str; 4] = ["index1", "index2", "index3", "index4"];

impl RestraintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index1(mut self, indices: Vec<usize>) -> Self {
        self.indices[0] = Some(indices);
        self
    }
    pub fn index2(mut self, indices: Vec<usize>) -> Self {
        self.indices[1] = Some(indices);
        self
    }
    pub fn index3(mut self, indices: Vec<usize>) -> Self {
        self.indices[2] = Some(indices);
        self
    }
    pub fn index4(mut self, indices: Vec<usize>) -> Self {
        self.indices[3] = Some(indices);
        self
    }
    pub fn group1(mut self, group: bool) -> Self {
        self.groups[0] = group;
        self
    }
    pub fn group2(mut self, group: bool) -> Self {
        self.groups[1] = group;
        self
    }
    pub fn group3(mut self, group: bool) -> Self {
        self.groups[2] = group;
        self
    }
    pub fn group4(mut self, group: bool) -> Self {
        self.groups[3] = group;
        self
    }
    pub fn amber_index(mut self, amber_index: bool) -> Self {
        self.amber_index = amber_index;
        self
    }
    pub fn flat_bottom(mut self, flat_bottom: bool) -> Self {
        self.flat_bottom = flat_bottom;
        self
    }

    pub fn schedule(mut self, phase: Phase, schedule: PhaseSchedule) -> Self {
        match phase {
            Phase::Attach => self.attach = Some(schedule),
            Phase::Pull => self.pull = Some(schedule),
            Phase::Release => self.release = Some(schedule),
        }
        self
    }

    pub fn build(self) -> Result<Restraint, RestraintError> {
        let [i1, i2, i3, i4] = self.indices;
        let [g1, g2, g3, g4] = self.groups;

        let op1 = Self::operand(0, i1.ok_or(RestraintError::MissingIndex("index1"))?, g1)?;
        let op2 = Self::operand(1, i2.ok_or(RestraintError::MissingIndex("index2"))?, g2)?;

        let geometry = match (i3, i4) {
            (None, None) => Geometry::Distance([op1, op2]),
            (Some(i3), None) => Geometry::Angle([op1, op2, Self::operand(2, i3, g3)?]),
            (Some(i3), Some(i4)) => Geometry::Torsion([
                op1,
                op2,
                Self::operand(2, i3, g3)?,
                Self::operand(3, i4, g4)?,
            ]),
            (None, Some(_)) => return Err(RestraintError::TorsionWithoutAngle),
        };

        Ok(Restraint {
            geometry,
            amber_index: self.amber_index,
            flat_bottom: self.flat_bottom,
            attach: self.attach,
            pull: self.pull,
            release: self.release,
        })
    }

    fn operand(slot: usize, indices: Vec<usize>, group: bool) -> Result<Operand, RestraintError> {
        let name = SLOT_NAMES[slot];
        match (indices.len(), group) {
            (0, _) => Err(RestraintError::EmptyIndex(name)),
            (_, true) => Ok(Operand::Group(indices)),
            (1, false) => Ok(Operand::Atom(indices[0])),
            (count, false) => Err(RestraintError::UngroupedMultiAtom { slot: name, count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_slots_build_a_distance() {
        let restraint = RestraintBuilder::new()
            .index1(vec![10])
            .index2(vec![20])
            .build()
            .unwrap();
        assert_eq!(
            restraint.geometry(),
            &Geometry::Distance([Operand::Atom(10), Operand::Atom(20)])
        );
        assert!(restraint.geometry().mask2());
        assert!(!restraint.geometry().mask3());
        assert!(!restraint.geometry().mask4());
    }

    #[test]
    fn third_and_fourth_slots_select_angle_and_torsion() {
        let angle = RestraintBuilder::new()
            .index1(vec![1])
            .index2(vec![2])
            .index3(vec![3])
            .build()
            .unwrap();
        assert!(matches!(angle.geometry(), Geometry::Angle(_)));
        assert!(angle.geometry().mask3() && !angle.geometry().mask4());

        let torsion = RestraintBuilder::new()
            .index1(vec![1])
            .index2(vec![2])
            .index3(vec![3])
            .index4(vec![4])
            .build()
            .unwrap();
        assert!(matches!(torsion.geometry(), Geometry::Torsion(_)));
        assert_eq!(torsion.geometry().atom_count(), 4);
    }

    #[test]
    fn group_flag_produces_centroid_operand() {
        let restraint = RestraintBuilder::new()
            .index1(vec![1, 2, 3])
            .group1(true)
            .index2(vec![7])
            .group2(true)
            .build()
            .unwrap();
        let ops = restraint.geometry().operands();
        assert_eq!(ops[0], Operand::Group(vec![1, 2, 3]));
        assert_eq!(ops[1], Operand::Group(vec![7]));
        assert!(restraint.geometry().has_group());
    }

    #[test]
    fn missing_or_empty_slots_are_rejected() {
        assert_eq!(
            RestraintBuilder::new().index1(vec![1]).build(),
            Err(RestraintError::MissingIndex("index2"))
        );
        assert_eq!(
            RestraintBuilder::new().index1(vec![]).index2(vec![1]).build(),
            Err(RestraintError::EmptyIndex("index1"))
        );
        assert_eq!(
            RestraintBuilder::new()
                .index1(vec![1])
                .index2(vec![2])
                .index4(vec![4])
                .build(),
            Err(RestraintError::TorsionWithoutAngle)
        );
    }

    #[test]
    fn ungrouped_slot_with_several_atoms_is_rejected() {
        assert_eq!(
            RestraintBuilder::new()
                .index1(vec![1])
                .index2(vec![2, 3])
                .build(),
            Err(RestraintError::UngroupedMultiAtom {
                slot: "index2",
                count: 2
            })
        );
    }

    #[test]
    fn flat_bottom_torsion_builds() {
        let restraint = RestraintBuilder::new()
            .index1(vec![1])
            .index2(vec![2])
            .index3(vec![3])
            .index4(vec![4])
            .flat_bottom(true)
            .build()
            .unwrap();
        assert!(restraint.is_flat_bottom());
        assert!(restraint.geometry().mask4());
    }

    #[test]
    fn values_require_both_target_and_force_constant() {
        let restraint = RestraintBuilder::new()
            .index1(vec![1])
            .index2(vec![2])
            .schedule(
                Phase::Attach,
                PhaseSchedule::new(
                    vec![Some(6.0), None, Some(6.0)],
                    vec![Some(0.0), Some(5.0), None],
                ),
            )
            .build()
            .unwrap();

        assert_eq!(restraint.values(Phase::Attach, 0), Some((6.0, 0.0)));
        assert_eq!(restraint.values(Phase::Attach, 1), None);
        assert_eq!(restraint.values(Phase::Attach, 2), None);
        assert_eq!(restraint.values(Phase::Attach, 3), None);
        assert_eq!(restraint.values(Phase::Pull, 0), None);
        assert_eq!(restraint.window_count(Phase::Attach), 3);
        assert_eq!(restraint.window_count(Phase::Release), 0);
    }

    #[test]
    fn constant_schedule_repeats_values() {
        let schedule = PhaseSchedule::constant(6.0, 5.0, 4);
        assert_eq!(schedule.len(), 4);
        assert_eq!(
            schedule.window(3),
            WindowValues {
                target: Some(6.0),
                force_constant: Some(5.0)
            }
        );
        assert!(PhaseSchedule::default().is_empty());
    }
}

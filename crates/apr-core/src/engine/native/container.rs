use super::force::CustomForce;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct ForceId;
}

/// A mutable collection of force terms owned by the caller.
///
/// Emitters only ever append terms and tag them; they never remove or reorder existing ones.
pub trait ForceContainer {
    type Handle: Copy;

    fn add_force(&mut self, force: CustomForce) -> Self::Handle;

    fn set_force_group(&mut self, handle: Self::Handle, group: u32);

    fn num_forces(&self) -> usize;
}

#[derive(Debug, Clone)]
struct ForceEntry {
    force: CustomForce,
    group: u32,
}

/// In-memory [`ForceContainer`] that can evaluate its own potential energy.
///
/// Terms keep their insertion order, and every term starts in force group 0.
#[derive(Debug, Clone, Default)]
pub struct ForceSystem {
    forces: SlotMap<ForceId, ForceEntry>,
    order: Vec<ForceId>,
}

impl ForceSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force(&self, id: ForceId) -> Option<&CustomForce> {
        self.forces.get(id).map(|entry| &entry.force)
    }

    pub fn force_group(&self, id: ForceId) -> Option<u32> {
        self.forces.get(id).map(|entry| entry.group)
    }

    /// Iterates over all terms in insertion order.
    pub fn forces(&self) -> impl Iterator<Item = (ForceId, &CustomForce)> {
        self.order
            .iter()
            .filter_map(|&id| self.forces.get(id).map(|entry| (id, &entry.force)))
    }

    /// Total energy of every term, in kJ/mol, for the coordinates of `structure`.
    pub fn potential_energy(&self, structure: &Structure) -> Result<f64, EngineError> {
        self.forces()
            .map(|(_, force)| force.energy(structure))
            .sum()
    }

    /// Energy of the terms tagged with `group`, in kJ/mol.
    pub fn group_energy(&self, structure: &Structure, group: u32) -> Result<f64, EngineError> {
        self.order
            .iter()
            .filter_map(|&id| self.forces.get(id))
            .filter(|entry| entry.group == group)
            .map(|entry| entry.force.energy(structure))
            .sum()
    }
}

impl ForceContainer for ForceSystem {
    type Handle = ForceId;

    fn add_force(&mut self, force: CustomForce) -> ForceId {
        let id = self.forces.insert(ForceEntry { force, group: 0 });
        self.order.push(id);
        id
    }

    fn set_force_group(&mut self, handle: ForceId, group: u32) {
        if let Some(entry) = self.forces.get_mut(handle) {
            entry.group = group;
        }
    }

    fn num_forces(&self) -> usize {
        self.forces.len()
    }
}

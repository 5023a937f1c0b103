use std::collections::HashMap;

/// Centroid groups declared in one window, keyed by their member list.
///
/// Labels are `g1`, `g2`, … in the order the member lists are first seen.
#[derive(Debug, Default)]
pub struct GroupTable {
    entries: Vec<(String, String)>,
    by_members: HashMap<String, usize>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label for `members`, allocating a new one on first use.
    pub fn label_for(&mut self, members: &str) -> &str {
        let index = match self.by_members.get(members).copied() {
            Some(index) => index,
            None => {
                let index = self.entries.len();
                self.entries
                    .push((format!("g{}", index + 1), members.to_string()));
                self.by_members.insert(members.to_string(), index);
                index
            }
        };
        &self.entries[index].0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `g1: COM ATOMS=11,12,13,` lines in allocation order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|(label, members)| format!("{label}: COM ATOMS={members}"))
    }
}

/// Collective variables declared in one window, keyed by their atom-reference string.
#[derive(Debug, Default)]
pub struct ColvarTable {
    declarations: Vec<String>,
    labels: Vec<String>,
    by_atoms: HashMap<String, usize>,
}

impl ColvarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label of the variable over `atoms`, declaring it as `kind` if it is new.
    ///
    /// The second element is `true` when a new declaration was added.
    pub fn declare(&mut self, kind: &str, atoms: &str) -> (&str, bool) {
        let (index, added) = match self.by_atoms.get(atoms).copied() {
            Some(index) => (index, false),
            None => {
                let index = self.labels.len();
                let label = format!("c{}", index + 1);
                self.declarations
                    .push(format!("{label}: {kind} ATOMS={atoms} NOPBC"));
                self.labels.push(label);
                self.by_atoms.insert(atoms.to_string(), index);
                (index, true)
            }
        };
        (&self.labels[index], added)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(String::as_str)
    }
}

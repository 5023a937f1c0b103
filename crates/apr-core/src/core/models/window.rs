use super::restraint::Restraint;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Window labels are zero-padded to this many digits.
const WINDOW_LABEL_WIDTH: usize = 3;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WindowError {
    #[error("Invalid window label '{0}'. Expected a phase prefix (a, p, r) followed by an index (e.g. 'a000')")]
    InvalidLabel(String),

    #[error("Unknown phase '{0}'. Expected 'attach', 'pull' or 'release'")]
    UnknownPhase(String),

    #[error("Cannot build a window list from an empty restraint list")]
    NoRestraints,

    #[error(
        "Inconsistent number of {phase} windows: restraint {restraint} defines {found}, expected {expected}"
    )]
    InconsistentWindowCount {
        phase: Phase,
        restraint: usize,
        expected: usize,
        found: usize,
    },
}

/// One of the three stages of the attach-pull-release protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Attach,
    Pull,
    Release,
}

impl Phase {
    /// All phases in protocol order.
    pub const ALL: [Phase; 3] = [Phase::Attach, Phase::Pull, Phase::Release];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Attach => "attach",
            Phase::Pull => "pull",
            Phase::Release => "release",
        }
    }

    /// The single-character prefix used in window directory names.
    pub fn prefix(self) -> char {
        match self {
            Phase::Attach => 'a',
            Phase::Pull => 'p',
            Phase::Release => 'r',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'a' => Some(Phase::Attach),
            'p' => Some(Phase::Pull),
            'r' => Some(Phase::Release),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attach" => Ok(Phase::Attach),
            "pull" => Ok(Phase::Pull),
            "release" => Ok(Phase::Release),
            _ => Err(WindowError::UnknownPhase(s.to_string())),
        }
    }
}

/// Identifies a single simulation window: a phase and the window index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId {
    pub phase: Phase,
    pub index: usize,
}

impl WindowId {
    pub fn new(phase: Phase, index: usize) -> Self {
        Self { phase, index }
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:0width$}",
            self.phase.prefix(),
            self.index,
            width = WINDOW_LABEL_WIDTH
        )
    }
}

impl FromStr for WindowId {
    type Err = WindowError;

    /// Parses a directory-style window label such as `a000`, `p12` or `r003`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WindowError::InvalidLabel(s.to_string());

        let mut chars = s.chars();
        let phase = chars.next().and_then(Phase::from_prefix).ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = digits.parse().map_err(|_| invalid())?;

        Ok(Self { phase, index })
    }
}

/// Builds the list of window labels covering every phase any restraint defines.
///
/// For each phase, in protocol order, the number of windows is the largest schedule length among
/// the restraints; phases no restraint defines contribute no windows.
///
/// # Errors
///
/// Returns [`WindowError::NoRestraints`] if `restraints` is empty.
pub fn create_window_list(restraints: &[Restraint]) -> Result<Vec<WindowId>, WindowError> {
    if restraints.is_empty() {
        return Err(WindowError::NoRestraints);
    }

    let mut windows = Vec::new();
    for phase in Phase::ALL {
        let count = restraints
            .iter()
            .map(|r| r.window_count(phase))
            .max()
            .unwrap_or(0);

        if count > 1000 {
            info!(
                "The {} phase has {} windows; zero padding only covers windows 0 - 999.",
                phase, count
            );
        }

        windows.extend((0..count).map(|index| WindowId::new(phase, index)));
    }

    Ok(windows)
}

/// Verifies that every restraint scheduled in a phase defines the same number of windows.
pub fn check_window_counts(restraints: &[Restraint]) -> Result<(), WindowError> {
    for phase in Phase::ALL {
        let mut expected: Option<usize> = None;
        for (i, restraint) in restraints.iter().enumerate() {
            let found = restraint.window_count(phase);
            if found == 0 {
                continue;
            }
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(WindowError::InconsistentWindowCount {
                        phase,
                        restraint: i,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::restraint::{PhaseSchedule, RestraintBuilder};

    fn distance_restraint(attach: usize, pull: usize) -> Restraint {
        let mut builder = RestraintBuilder::new().index1(vec![0]).index2(vec![1]);
        if attach > 0 {
            builder = builder.schedule(Phase::Attach, PhaseSchedule::constant(6.0, 5.0, attach));
        }
        if pull > 0 {
            builder = builder.schedule(Phase::Pull, PhaseSchedule::constant(6.0, 5.0, pull));
        }
        builder.build().unwrap()
    }

    #[test]
    fn parses_labels_for_every_phase() {
        assert_eq!("a000".parse(), Ok(WindowId::new(Phase::Attach, 0)));
        assert_eq!("p012".parse(), Ok(WindowId::new(Phase::Pull, 12)));
        assert_eq!("r3".parse(), Ok(WindowId::new(Phase::Release, 3)));
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "a", "x000", "a-01", "a01b", "attach"] {
            assert_eq!(
                label.parse::<WindowId>(),
                Err(WindowError::InvalidLabel(label.to_string())),
                "label {label:?}"
            );
        }
    }

    #[test]
    fn display_zero_pads_index() {
        assert_eq!(WindowId::new(Phase::Attach, 0).to_string(), "a000");
        assert_eq!(WindowId::new(Phase::Pull, 45).to_string(), "p045");
        assert_eq!(WindowId::new(Phase::Release, 1234).to_string(), "r1234");
    }

    #[test]
    fn phase_from_str_is_case_insensitive() {
        assert_eq!("Attach".parse(), Ok(Phase::Attach));
        assert_eq!("PULL".parse(), Ok(Phase::Pull));
        assert_eq!("release".parse(), Ok(Phase::Release));
        assert!("push".parse::<Phase>().is_err());
    }

    #[test]
    fn window_list_uses_longest_schedule_per_phase() {
        let restraints = vec![distance_restraint(3, 2), distance_restraint(2, 0)];
        let labels: Vec<String> = create_window_list(&restraints)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["a000", "a001", "a002", "p000", "p001"]);
    }

    #[test]
    fn window_list_requires_restraints() {
        assert_eq!(create_window_list(&[]), Err(WindowError::NoRestraints));
    }

    #[test]
    fn window_counts_must_agree_within_a_phase() {
        let restraints = vec![distance_restraint(3, 0), distance_restraint(4, 0)];
        assert_eq!(
            check_window_counts(&restraints),
            Err(WindowError::InconsistentWindowCount {
                phase: Phase::Attach,
                restraint: 1,
                expected: 3,
                found: 4,
            })
        );
    }

    #[test]
    fn unscheduled_phases_do_not_count_as_mismatch() {
        let restraints = vec![distance_restraint(3, 5), distance_restraint(3, 0)];
        assert!(check_window_counts(&restraints).is_ok());
    }
}

//! Parse results
//!
//! A successful read yields a `StepSequence`: the ordered, non-empty list of
//! steps plus any advisory warnings and Gaussian job metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

use atomic_mol::Step;

use crate::gaussian::JobInfo;
use crate::traits::FileFormat;

/// Advisory problem reported alongside a successful read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseWarning {
    /// The sequence does not end in a normally terminated job
    BadTermination {
        /// Job whose termination was wrong or missing
        job_number: u32,
        /// What the reader saw instead of a normal termination
        reason: String,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::BadTermination { job_number, reason } => {
                write!(f, "Job {job_number} did not terminate normally: {reason}")
            }
        }
    }
}

/// Ordered, non-empty sequence of steps read from one file
#[derive(Debug, Clone, PartialEq)]
pub struct StepSequence {
    /// Format the steps were read from
    pub format: FileFormat,
    /// Steps in file order
    pub steps: Vec<Step>,
    /// Advisory warnings, never fatal
    pub warnings: Vec<ParseWarning>,
    /// Gaussian job metadata, one entry per job (empty for other formats)
    pub jobs: Vec<JobInfo>,
}

impl StepSequence {
    /// Create a sequence with no warnings or job metadata
    pub fn new(format: FileFormat, steps: Vec<Step>) -> Self {
        StepSequence {
            format,
            steps,
            warnings: Vec::new(),
            jobs: Vec::new(),
        }
    }

    /// The last step, if it was marked final
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last().filter(|step| step.is_final_step)
    }

    /// Whether the sequence ended normally (final step set, no termination warning)
    pub fn is_terminated(&self) -> bool {
        self.final_step().is_some()
            && !self
                .warnings
                .iter()
                .any(|w| matches!(w, ParseWarning::BadTermination { .. }))
    }

    /// Number of steps
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps (never true for a sequence returned by a reader)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over steps in file order
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl IntoIterator for StepSequence {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomic_mol::Molecule;

    #[test]
    fn test_final_step_only_when_marked() {
        let mut steps = vec![Step::new(Molecule::new()), Step::new(Molecule::new())];
        let seq = StepSequence::new(FileFormat::Xyz, steps.clone());
        assert!(seq.final_step().is_none());
        assert!(!seq.is_terminated());

        steps[1].is_final_step = true;
        let mut seq = StepSequence::new(FileFormat::Xyz, steps);
        assert!(seq.is_terminated());
        assert_eq!(seq.len(), 2);

        seq.warnings.push(ParseWarning::BadTermination {
            job_number: 1,
            reason: "Error termination".to_string(),
        });
        assert!(!seq.is_terminated());
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::BadTermination {
            job_number: 2,
            reason: "no termination line".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Job 2 did not terminate normally: no termination line"
        );
    }
}

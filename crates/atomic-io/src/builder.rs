//! Step sequence builder
//!
//! Every reader accumulates atoms through a `StepSequenceBuilder`. The
//! builder owns the open molecule, assigns step numbers and guards the
//! sequence invariants: at most one step is open at a time, only the last
//! step may be final, and a finished sequence is never empty.

use atomic_mol::{Molecule, Residue, Step};

use crate::error::{IoError, IoResult};
use crate::traits::FileFormat;

/// Per-step metadata attached when a step is closed
#[derive(Debug, Clone)]
pub struct StepFields {
    /// Simulation timestep of a trajectory frame
    pub timestep: Option<i64>,
    /// Energy known when the step closes
    pub energy: Option<f64>,
    /// Input geometry (`Some(true)`) or computed geometry (`Some(false)`)
    pub is_input: Option<bool>,
    /// Step read from a protein structure
    pub is_protein: bool,
    /// Backbone atoms of a protein step
    pub backbone: Option<Molecule>,
    /// Residues of a protein step
    pub residues: Option<Vec<Residue>>,
    /// 1-based job index
    pub job_number: u32,
}

impl Default for StepFields {
    fn default() -> Self {
        StepFields {
            timestep: None,
            energy: None,
            is_input: None,
            is_protein: false,
            backbone: None,
            residues: None,
            job_number: 1,
        }
    }
}

/// Accumulates molecules into an ordered step sequence
#[derive(Debug)]
pub struct StepSequenceBuilder {
    format: FileFormat,
    steps: Vec<Step>,
    current: Option<Molecule>,
    numbered: bool,
}

impl StepSequenceBuilder {
    /// Create a builder whose steps carry no step number
    pub fn new(format: FileFormat) -> Self {
        StepSequenceBuilder {
            format,
            steps: Vec::new(),
            current: None,
            numbered: false,
        }
    }

    /// Create a builder that numbers steps `1, 2, ...` in close order
    pub fn numbered(format: FileFormat) -> Self {
        StepSequenceBuilder {
            numbered: true,
            ..Self::new(format)
        }
    }

    /// Open a new step and return its molecule
    pub fn open_step(&mut self) -> IoResult<&mut Molecule> {
        if self.current.is_some() {
            return Err(IoError::internal(format!(
                "{} reader opened a step while another was open",
                self.format
            )));
        }
        Ok(self.current.insert(Molecule::new()))
    }

    /// Whether a step is currently open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Molecule of the open step
    pub fn current_molecule(&mut self) -> Option<&mut Molecule> {
        self.current.as_mut()
    }

    /// Close the open step with its metadata
    pub fn close_step(&mut self, fields: StepFields) -> IoResult<&mut Step> {
        let molecule = self.current.take().ok_or_else(|| {
            IoError::internal(format!("{} reader closed a step that was never opened", self.format))
        })?;
        Ok(self.push(molecule, fields))
    }

    /// Drop the open step, returning its molecule
    pub fn discard_step(&mut self) -> Option<Molecule> {
        self.current.take()
    }

    /// Append a step whose molecule was built elsewhere
    pub fn add_step(&mut self, molecule: Molecule, fields: StepFields) -> IoResult<&mut Step> {
        if self.current.is_some() {
            return Err(IoError::internal(format!(
                "{} reader appended a step while another was open",
                self.format
            )));
        }
        Ok(self.push(molecule, fields))
    }

    fn push(&mut self, molecule: Molecule, fields: StepFields) -> &mut Step {
        let step_number = self.numbered.then(|| self.steps.len() as u32 + 1);
        self.steps.push(Step {
            step_number,
            molecule: Some(molecule),
            energy: fields.energy,
            frequencies: None,
            is_final_step: false,
            job_number: fields.job_number,
            timestep: fields.timestep,
            is_input: fields.is_input,
            is_protein: fields.is_protein,
            backbone: fields.backbone,
            residues: fields.residues,
        });
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// Most recently closed step
    pub fn last_step_mut(&mut self) -> Option<&mut Step> {
        self.steps.last_mut()
    }

    /// Number of closed steps
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step has been closed yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Mark the last closed step as final
    pub fn mark_final(&mut self) -> IoResult<()> {
        let format = self.format;
        let last = self.steps.last_mut().ok_or_else(|| {
            IoError::internal(format!("{format} reader marked a final step in an empty sequence"))
        })?;
        last.is_final_step = true;
        Ok(())
    }

    /// Consume the builder, returning the closed steps
    pub fn finish(self) -> IoResult<Vec<Step>> {
        if self.current.is_some() {
            return Err(IoError::internal(format!(
                "{} reader finished with a step still open",
                self.format
            )));
        }
        if self.steps.is_empty() {
            return Err(IoError::internal(format!(
                "{} reader finished without any step",
                self.format
            )));
        }
        let last = self.steps.len() - 1;
        if self.steps[..last].iter().any(|s| s.is_final_step) {
            return Err(IoError::internal(format!(
                "{} reader marked an interior step final",
                self.format
            )));
        }
        Ok(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use atomic_mol::{Element, Position};

    #[test]
    fn test_numbered_steps() {
        let mut builder = StepSequenceBuilder::numbered(FileFormat::Xyz);
        for i in 0..3 {
            let mol = builder.open_step().unwrap();
            mol.add_atom(Element::Helium, Position::new(i as f64, 0.0, 0.0));
            builder
                .close_step(StepFields {
                    timestep: Some(i * 10),
                    ..Default::default()
                })
                .unwrap();
        }
        builder.mark_final().unwrap();

        let steps = builder.finish().unwrap();
        let numbers: Vec<_> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(steps[2].timestep, Some(20));
        assert!(steps[2].is_final_step);
        assert!(!steps[0].is_final_step);
    }

    #[test]
    fn test_unnumbered_step() {
        let mut builder = StepSequenceBuilder::new(FileFormat::Gjf);
        builder.add_step(Molecule::new(), StepFields::default()).unwrap();
        let steps = builder.finish().unwrap();
        assert_eq!(steps[0].step_number, None);
        assert_eq!(steps[0].job_number, 1);
        assert!(steps[0].molecule.is_some());
    }

    #[test]
    fn test_invariant_violations() {
        let mut builder = StepSequenceBuilder::new(FileFormat::Xyz);
        let err = builder.close_step(StepFields::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalFailure);
        assert_eq!(builder.mark_final().unwrap_err().kind(), ErrorKind::InternalFailure);

        builder.open_step().unwrap();
        assert!(builder.open_step().is_err());
        assert!(builder.add_step(Molecule::new(), StepFields::default()).is_err());
        assert_eq!(builder.finish().unwrap_err().kind(), ErrorKind::InternalFailure);

        let mut discarding = StepSequenceBuilder::new(FileFormat::Log);
        discarding.open_step().unwrap();
        assert!(discarding.discard_step().is_some());
        assert!(!discarding.is_open());

        let empty = StepSequenceBuilder::new(FileFormat::Xyz);
        assert_eq!(empty.finish().unwrap_err().kind(), ErrorKind::InternalFailure);
    }

    #[test]
    fn test_interior_final_step_rejected() {
        let mut builder = StepSequenceBuilder::numbered(FileFormat::Log);
        builder.add_step(Molecule::new(), StepFields::default()).unwrap();
        builder.mark_final().unwrap();
        builder.add_step(Molecule::new(), StepFields::default()).unwrap();
        assert_eq!(builder.finish().unwrap_err().kind(), ErrorKind::InternalFailure);
    }
}

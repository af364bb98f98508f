//! Gaussian log (`.log`/`.qfi`) reader
//!
//! Reading happens in two phases per job. First the echoed input deck is
//! reconstructed (see [`super::echo`]) and parsed as an input file, which
//! gives the job metadata and its input geometry. Then every orientation
//! block becomes a step; `SCF Done:` energies and `Frequencies` lines are
//! attached to the most recent step. `Link1:` starts the next job.

use std::io::Read;

use atomic_mol::{Element, Molecule, Position};

use crate::builder::{StepFields, StepSequenceBuilder};
use crate::detect::LogDialect;
use crate::error::{IoError, IoResult};
use crate::lines::LineReader;
use crate::sequence::{ParseWarning, StepSequence};
use crate::traits::{FileFormat, Orientation, ReadOptions, StepReader};

use super::echo::{EchoStatus, InputEcho};
use super::input::parse_deck;
use super::job::{is_rule, JobInfo, Termination};

/// Gaussian log reader
pub struct LogReader<R> {
    lines: LineReader<R>,
    options: ReadOptions,
}

/// Per-job reading state
struct JobState {
    info: JobInfo,
    echo: InputEcho,
    echo_read: bool,
    input_geometry: Option<Molecule>,
}

impl JobState {
    fn new(job_number: u32, echo: InputEcho) -> Self {
        JobState {
            info: JobInfo::new(job_number),
            echo,
            echo_read: false,
            input_geometry: None,
        }
    }
}

/// Whether a trimmed line opens any kind of orientation block
fn is_orientation_header(line: &str) -> bool {
    Orientation::Input.matches_header(line) || Orientation::Standard.matches_header(line)
}

impl<R: Read> LogReader<R> {
    /// Create a new Gaussian log reader
    pub fn new(reader: R, options: ReadOptions) -> Self {
        LogReader {
            lines: LineReader::new(reader, FileFormat::Log),
            options,
        }
    }

    /// Close the input echo of `job` and read its deck
    fn finish_echo(&self, job: &mut JobState, builder: &mut StepSequenceBuilder) -> IoResult<()> {
        job.echo.finish();
        job.echo_read = true;

        let echo = &job.echo;
        job.info.link0 = echo.link0.clone();
        job.info.route = echo.route.join(" ");
        job.info.title = echo.title.join(" ");
        job.info.charge = echo.charge;
        job.info.multiplicity = echo.multiplicity;

        let Some(deck) = echo.deck() else {
            log::debug!("Gaussian job {} echoed no molecule", job.info.job_number);
            return Ok(());
        };

        let molecule = match parse_deck(&deck) {
            Ok(jobs) => jobs
                .into_iter()
                .next()
                .map(|parsed| parsed.molecule)
                .filter(|mol| !mol.is_empty()),
            Err(e) => {
                log::warn!(
                    "Echoed input geometry of Gaussian job {} is not readable: {}",
                    job.info.job_number,
                    e
                );
                None
            }
        };
        job.info.input_deck = deck;

        if let Some(molecule) = molecule {
            if self.options.include_input_geometry {
                builder.add_step(
                    molecule.clone(),
                    StepFields {
                        is_input: Some(true),
                        job_number: job.info.job_number,
                        ..Default::default()
                    },
                )?;
            }
            job.input_geometry = Some(molecule);
        }
        Ok(())
    }

    /// Parse one row of an orientation block, `None` for ghost atoms
    ///
    /// `center Z [type] x y z`
    fn parse_orientation_row(&self, line: &str) -> IoResult<Option<(Element, Position)>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 5 && parts.len() != 6 {
            return Err(self.lines.bad_coordinates(format!(
                "Expected 5 or 6 columns in orientation row, got {}",
                parts.len()
            )));
        }

        let number: i32 = parts[1].parse().map_err(|_| {
            self.lines
                .bad_coordinates(format!("Invalid atomic number '{}'", parts[1]))
        })?;
        if number <= 0 {
            log::debug!(
                "Skipping ghost atom at line {} of Gaussian log",
                self.lines.line_number()
            );
            return Ok(None);
        }
        let element = Element::from_atomic_number(number as u32).ok_or_else(|| {
            self.lines
                .bad_coordinates(format!("Unknown atomic number {}", number))
        })?;

        let n = parts.len();
        let coord = |i: usize, axis: &str| -> IoResult<f64> {
            parts[i].parse().map_err(|_| {
                self.lines
                    .bad_coordinates(format!("Invalid {} coordinate '{}'", axis, parts[i]))
            })
        };
        let position = Position::new(coord(n - 3, "x")?, coord(n - 2, "y")?, coord(n - 1, "z")?);
        Ok(Some((element, position)))
    }

    /// `SCF Done:  E(RB3LYP) =  -76.4089533460     A.U. after   10 cycles`
    fn parse_energy(&self, line: &str) -> IoResult<f64> {
        let mut parts = line.split_whitespace().skip_while(|t| *t != "=");
        parts
            .nth(1)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| self.lines.malformed("Invalid SCF energy line"))
    }

    /// `Frequencies --  1635.12  3787.68  3909.21`, or the `---` form of
    /// high-precision modes; returns the dash marker with the values
    fn parse_frequencies<'a>(&self, line: &'a str) -> IoResult<Option<(&'a str, Vec<f64>)>> {
        let mut parts = line.split_whitespace();
        if parts.next() != Some("Frequencies") {
            return Ok(None);
        }
        let marker = match parts.next() {
            Some(t) if !t.is_empty() && t.bytes().all(|b| b == b'-') => t,
            _ => return Ok(None),
        };

        let values = parts
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| self.lines.malformed(format!("Invalid frequency '{}'", t)))
            })
            .collect::<IoResult<Vec<_>>>()?;
        if values.is_empty() {
            return Err(self.lines.malformed("Frequencies line without values"));
        }
        Ok(Some((marker, values)))
    }

    /// Finalize a job: read a pending echo and keep its input geometry
    fn end_job(
        &self,
        mut job: JobState,
        builder: &mut StepSequenceBuilder,
        jobs: &mut Vec<JobInfo>,
        input_geometries: &mut Vec<(u32, Molecule)>,
    ) -> IoResult<()> {
        if !job.echo_read {
            self.finish_echo(&mut job, builder)?;
        }
        if let Some(molecule) = job.input_geometry.take() {
            input_geometries.push((job.info.job_number, molecule));
        }
        jobs.push(job.info);
        Ok(())
    }
}

impl<R: Read> StepReader for LogReader<R> {
    fn read_steps(&mut self) -> IoResult<StepSequence> {
        let mut dialect = None;
        let mut builder = StepSequenceBuilder::numbered(FileFormat::Log);
        let mut jobs = Vec::new();
        let mut input_geometries = Vec::new();
        let mut job = JobState::new(1, InputEcho::new());
        // Dashed rules seen since the orientation header
        let mut block: Option<u32> = None;
        // Dash marker of the frequency table feeding the last step
        let mut frequency_marker: Option<String> = None;

        while let Some(line) = self.lines.next_line()? {
            if dialect.is_none() {
                match LogDialect::sniff(&line) {
                    Some(LogDialect::Gamess) => {
                        return Err(IoError::unsupported(
                            "GAMESS log",
                            "reading GAMESS output is not implemented",
                        ))
                    }
                    found => dialect = found,
                }
            }
            let trimmed = line.trim();

            if trimmed.starts_with("Link1:") || trimmed.eq_ignore_ascii_case("--link1--") {
                if block.take().is_some() && builder.discard_step().is_some() {
                    log::warn!(
                        "Discarding unterminated orientation block before line {}",
                        self.lines.line_number()
                    );
                }
                frequency_marker = None;
                let next = job.info.job_number + 1;
                let done = std::mem::replace(&mut job, JobState::new(next, InputEcho::after_banner()));
                self.end_job(done, &mut builder, &mut jobs, &mut input_geometries)?;
                continue;
            }
            if trimmed.starts_with("Normal termination") {
                job.info.termination = Termination::Normal;
                continue;
            }
            if trimmed.starts_with("Error termination") {
                job.info.termination = Termination::Error;
                continue;
            }

            if !job.echo_read {
                if !is_orientation_header(trimmed) {
                    if job.echo.feed(&line) == EchoStatus::Finished {
                        self.finish_echo(&mut job, &mut builder)?;
                    }
                    continue;
                }
                self.finish_echo(&mut job, &mut builder)?;
            }

            if let Some(rules) = block {
                if is_rule(trimmed, '-') {
                    let rules = rules + 1;
                    block = Some(rules);
                    match rules {
                        2 => {
                            builder.open_step()?;
                        }
                        3 => {
                            builder.close_step(StepFields {
                                is_input: Some(false),
                                job_number: job.info.job_number,
                                ..Default::default()
                            })?;
                            block = None;
                            frequency_marker = None;
                        }
                        _ => {}
                    }
                } else if rules == 2 {
                    if let Some((element, position)) = self.parse_orientation_row(trimmed)? {
                        if let Some(molecule) = builder.current_molecule() {
                            molecule.add_atom(element, position);
                        }
                    }
                }
                continue;
            }

            if self.options.orientation.matches_header(trimmed) {
                block = Some(0);
                continue;
            }

            if trimmed.starts_with("SCF Done:") {
                let energy = self.parse_energy(trimmed)?;
                match builder.last_step_mut() {
                    Some(step) => step.energy = Some(energy),
                    None => log::debug!(
                        "SCF energy at line {} precedes any geometry",
                        self.lines.line_number()
                    ),
                }
                continue;
            }

            if let Some((marker, values)) = self.parse_frequencies(trimmed)? {
                if frequency_marker.as_deref().is_some_and(|m| m != marker) {
                    // The same modes are printed again at normal precision
                    continue;
                }
                match builder.last_step_mut() {
                    Some(step) => {
                        step.push_frequencies(values);
                        frequency_marker = Some(marker.to_string());
                    }
                    None => log::debug!(
                        "Frequencies at line {} precede any geometry",
                        self.lines.line_number()
                    ),
                }
            }
        }

        if dialect.is_none() {
            return Err(IoError::unsupported(
                "log",
                "no Gaussian program signature found",
            ));
        }
        if block.is_some() && builder.discard_step().is_some() {
            log::warn!("Discarding orientation block truncated by end of file");
        }
        self.end_job(job, &mut builder, &mut jobs, &mut input_geometries)?;

        if builder.is_empty() {
            for (job_number, molecule) in input_geometries {
                builder.add_step(
                    molecule,
                    StepFields {
                        is_input: Some(true),
                        job_number,
                        ..Default::default()
                    },
                )?;
            }
        }
        if builder.is_empty() {
            return Err(self.lines.malformed("No geometry found in Gaussian log"));
        }

        let mut warnings = Vec::new();
        for info in &jobs {
            if info.termination != Termination::Normal {
                log::warn!(
                    "Gaussian job {} did not terminate normally: {}",
                    info.job_number,
                    info.termination
                );
                warnings.push(ParseWarning::BadTermination {
                    job_number: info.job_number,
                    reason: info.termination.to_string(),
                });
            }
        }
        if jobs
            .last()
            .is_some_and(|info| info.termination == Termination::Normal)
        {
            builder.mark_final()?;
        }

        Ok(StepSequence {
            format: FileFormat::Log,
            steps: builder.finish()?,
            warnings,
            jobs,
        })
    }
}

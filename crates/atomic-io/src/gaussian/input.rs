//! Gaussian input (`.gjf`/`.com`) reader
//!
//! An input deck is read section by section: link 0 commands and route,
//! title, charge and multiplicity, then the molecule specification, each
//! section ending at a blank line. `--Link1--` starts another job. Only
//! Cartesian molecule specifications are supported.

use std::io::Read;

use atomic_mol::{Element, Molecule, Position};

use crate::builder::{StepFields, StepSequenceBuilder};
use crate::error::{IoError, IoResult};
use crate::lines::LineReader;
use crate::sequence::StepSequence;
use crate::traits::{FileFormat, StepReader};

use super::job::{parse_charge_multiplicity, tokens, JobInfo};

/// One job read from an input deck
#[derive(Debug, Clone, PartialEq)]
pub struct GjfJob {
    /// Job metadata
    pub info: JobInfo,
    /// Molecule specification (empty for `geom=check` jobs)
    pub molecule: Molecule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Route,
    Title,
    ChargeMultiplicity,
    Molecule,
    Trailing,
}

/// Gaussian input reader
pub struct GjfReader<R> {
    lines: LineReader<R>,
}

impl<R: Read> GjfReader<R> {
    /// Create a new Gaussian input reader
    pub fn new(reader: R) -> Self {
        GjfReader {
            lines: LineReader::new(reader, FileFormat::Gjf),
        }
    }

    /// Read every job of the deck
    pub fn read_jobs(&mut self) -> IoResult<Vec<GjfJob>> {
        let mut jobs = Vec::new();
        let mut job = GjfJob {
            info: JobInfo::new(1),
            molecule: Molecule::new(),
        };
        let mut deck = String::new();
        let mut route: Vec<String> = Vec::new();
        let mut title: Vec<String> = Vec::new();
        let mut section = Section::Route;
        let mut started = false;

        while let Some(line) = self.lines.next_line()? {
            let trimmed = line.trim();

            if trimmed.eq_ignore_ascii_case("--link1--") {
                if started {
                    finish_job(&mut job, &mut deck, &mut route, &mut title);
                    let next = job.info.job_number + 1;
                    log::debug!(
                        "Starting job {} at line {}",
                        next,
                        self.lines.line_number()
                    );
                    jobs.push(std::mem::replace(
                        &mut job,
                        GjfJob {
                            info: JobInfo::new(next),
                            molecule: Molecule::new(),
                        },
                    ));
                }
                section = Section::Route;
                started = false;
                continue;
            }
            if trimmed.starts_with('!') {
                continue;
            }
            deck.push_str(&line);
            deck.push('\n');

            match section {
                Section::Route => {
                    if trimmed.is_empty() {
                        if !route.is_empty() {
                            section = Section::Title;
                        }
                    } else if trimmed.starts_with('%') && route.is_empty() {
                        job.info.link0.push(trimmed.to_string());
                        started = true;
                    } else if trimmed.starts_with('#') || !route.is_empty() {
                        route.push(trimmed.to_string());
                        started = true;
                    } else {
                        return Err(self.lines.malformed(format!(
                            "Expected a route line starting with '#', got '{}'",
                            trimmed
                        )));
                    }
                }
                Section::Title => {
                    if trimmed.is_empty() {
                        section = Section::ChargeMultiplicity;
                    } else {
                        title.push(trimmed.to_string());
                    }
                }
                Section::ChargeMultiplicity => {
                    let (charge, multiplicity) =
                        parse_charge_multiplicity(trimmed).ok_or_else(|| {
                            self.lines.malformed(format!(
                                "Expected charge and multiplicity, got '{}'",
                                trimmed
                            ))
                        })?;
                    job.info.charge = Some(charge);
                    job.info.multiplicity = Some(multiplicity);
                    section = Section::Molecule;
                }
                Section::Molecule => {
                    if trimmed.is_empty() {
                        section = Section::Trailing;
                    } else {
                        let (element, position) =
                            parse_atom_line(trimmed, FileFormat::Gjf, self.lines.line_number())?;
                        job.molecule.add_atom(element, position);
                    }
                }
                Section::Trailing => {}
            }
        }

        if started {
            finish_job(&mut job, &mut deck, &mut route, &mut title);
            jobs.push(job);
        }
        Ok(jobs)
    }
}

fn finish_job(job: &mut GjfJob, deck: &mut String, route: &mut Vec<String>, title: &mut Vec<String>) {
    job.info.route = route.join(" ");
    job.info.title = title.join(" ");
    job.info.input_deck = std::mem::take(deck);
    route.clear();
    title.clear();
}

impl<R: Read> StepReader for GjfReader<R> {
    fn read_steps(&mut self) -> IoResult<StepSequence> {
        let jobs = self.read_jobs()?;

        let Some(job) = jobs.iter().find(|job| !job.molecule.is_empty()) else {
            return Err(self.lines.malformed("No molecule specification found"));
        };

        let mut builder = StepSequenceBuilder::new(FileFormat::Gjf);
        builder.add_step(
            job.molecule.clone(),
            StepFields {
                is_input: Some(true),
                job_number: job.info.job_number,
                ..Default::default()
            },
        )?;
        builder.mark_final()?;

        let mut seq = StepSequence::new(FileFormat::Gjf, builder.finish()?);
        seq.jobs = jobs.into_iter().map(|job| job.info).collect();
        Ok(seq)
    }
}

/// Parse the deck text of an input file
pub(crate) fn parse_deck(deck: &str) -> IoResult<Vec<GjfJob>> {
    GjfReader::new(deck.as_bytes()).read_jobs()
}

/// Resolve an atom label to an element
///
/// Labels are a symbol or an atomic number, optionally followed by a
/// numeric suffix (`C1`), atom type and charge (`C-CA--0.25`) or
/// parameters (`C(Fragment=1)`). Gaussian ignores case in labels.
pub fn element_from_label(label: &str) -> Option<Element> {
    let base = label.split(['-', '(']).next().unwrap_or(label);
    if base.is_empty() {
        return None;
    }
    if base.bytes().all(|b| b.is_ascii_digit()) {
        return Element::from_token(base);
    }

    let symbol = base.trim_end_matches(|c: char| c.is_ascii_digit());
    let mut chars = symbol.chars();
    let first = chars.next()?;
    let normalized: String = std::iter::once(first.to_ascii_uppercase())
        .chain(chars.map(|c| c.to_ascii_lowercase()))
        .collect();
    Element::from_symbol(&normalized)
}

/// Parse a Cartesian molecule specification line
///
/// Accepts `label x y z`, `label freeze x y z` where the freeze code is
/// `0` or negative, and ONIOM lines where a layer letter follows the
/// coordinates. Anything else is treated as a Z-matrix line.
pub(crate) fn parse_atom_line(
    line: &str,
    format: FileFormat,
    line_number: usize,
) -> IoResult<(Element, Position)> {
    let parts: Vec<&str> = tokens(line).collect();
    let Some((label, fields)) = parts.split_first() else {
        return Err(IoError::bad_coordinates(format, line_number, "Empty atom line"));
    };

    let element = element_from_label(label).ok_or_else(|| {
        IoError::bad_coordinates(format, line_number, format!("Unknown atom label '{}'", label))
    })?;

    let is_freeze_code = |t: &str| t.parse::<i32>().map_or(false, |v| v <= 0);
    let is_layer = |t: &str| matches!(t, "H" | "M" | "L" | "h" | "m" | "l");

    let xyz = match fields.len() {
        3 => &fields[..3],
        n if n >= 4 && is_layer(fields[3]) => &fields[..3],
        n if n >= 4 && is_freeze_code(fields[0]) => &fields[1..4],
        _ => {
            return Err(IoError::bad_coordinates(
                format,
                line_number,
                format!("Z-matrix molecule specifications are not supported: '{}'", line),
            ))
        }
    };

    let mut coords = [0.0f64; 3];
    for (value, (token, axis)) in coords.iter_mut().zip(xyz.iter().zip(["x", "y", "z"])) {
        *value = token.parse().map_err(|_| {
            IoError::bad_coordinates(
                format,
                line_number,
                format!("Invalid {} coordinate '{}'", axis, token),
            )
        })?;
    }

    Ok((element, Position::new(coords[0], coords[1], coords[2])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const WATER: &str = "%chk=water.chk
%mem=1GB
#p opt freq
b3lyp/6-31g(d)

Water optimization

0 1
O    0.000000    0.000000    0.117300
H1   0.000000    0.757200   -0.469200
H(Fragment=1)  0.000000   -0.757200   -0.469200

";

    fn read(data: &str) -> IoResult<StepSequence> {
        GjfReader::new(data.as_bytes()).read_steps()
    }

    #[test]
    fn test_element_from_label() {
        assert_eq!(element_from_label("C"), Some(Element::Carbon));
        assert_eq!(element_from_label("C12"), Some(Element::Carbon));
        assert_eq!(element_from_label("Cl2"), Some(Element::Chlorine));
        assert_eq!(element_from_label("CL"), Some(Element::Chlorine));
        assert_eq!(element_from_label("C-CA--0.25"), Some(Element::Carbon));
        assert_eq!(element_from_label("O(Fragment=2)"), Some(Element::Oxygen));
        assert_eq!(element_from_label("8"), Some(Element::Oxygen));
        assert_eq!(element_from_label("Xx"), None);
        assert_eq!(element_from_label("-1"), None);
    }

    #[test]
    fn test_label_matching_is_token_exact() {
        // "C" must not match inside "Cl", nor "H" inside "Hg".
        let (element, _) = parse_atom_line("Cl 0 0 0", FileFormat::Gjf, 1).unwrap();
        assert_eq!(element, Element::Chlorine);
        let (element, _) = parse_atom_line("Hg 0 0 0", FileFormat::Gjf, 1).unwrap();
        assert_eq!(element, Element::Mercury);
    }

    #[test]
    fn test_atom_line_forms() {
        let (_, pos) = parse_atom_line("C 0 1.5 -2.0 2.5", FileFormat::Gjf, 1).unwrap();
        assert_eq!(pos, Position::new(1.5, -2.0, 2.5));

        let (_, pos) = parse_atom_line("C,1.0,2.0,3.0", FileFormat::Gjf, 1).unwrap();
        assert_eq!(pos, Position::new(1.0, 2.0, 3.0));

        let (element, pos) =
            parse_atom_line("C-CA--0.25 -1 1.0 2.0 3.0 L H-HA 4", FileFormat::Gjf, 1).unwrap();
        assert_eq!(element, Element::Carbon);
        assert_eq!(pos, Position::new(1.0, 2.0, 3.0));

        let (_, pos) = parse_atom_line("N 1.0 2.0 3.0 H", FileFormat::Gjf, 1).unwrap();
        assert_eq!(pos, Position::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zmatrix_rejected() {
        for line in ["O", "H 1 0.96", "H 1 0.96 2 104.5"] {
            let err = parse_atom_line(line, FileFormat::Gjf, 9).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadInputCoordinates);
            assert_eq!(err.line(), Some(9));
        }
    }

    #[test]
    fn test_read_water_deck() {
        let seq = read(WATER).unwrap();
        assert_eq!(seq.len(), 1);

        let step = &seq.steps[0];
        assert_eq!(step.step_number, None);
        assert_eq!(step.energy, None);
        assert_eq!(step.is_input, Some(true));
        assert!(step.is_final_step);

        let mol = step.molecule.as_ref().unwrap();
        let elements: Vec<_> = mol.atoms().map(|a| a.element).collect();
        assert_eq!(
            elements,
            vec![Element::Oxygen, Element::Hydrogen, Element::Hydrogen]
        );
        assert!((mol.get(2).unwrap().position.y - 0.7572).abs() < 1e-9);

        let job = &seq.jobs[0];
        assert_eq!(job.link0, vec!["%chk=water.chk", "%mem=1GB"]);
        assert_eq!(job.route, "#p opt freq b3lyp/6-31g(d)");
        assert_eq!(job.title, "Water optimization");
        assert_eq!(job.charge, Some(0));
        assert_eq!(job.multiplicity, Some(1));
        assert!(job.has_keyword("freq"));
    }

    #[test]
    fn test_link1_jobs() {
        let data = format!("{WATER}--Link1--\n%chk=water.chk\n# freq geom=check\n\nFrequencies\n\n0 1\n\n");
        let seq = read(&data).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.jobs.len(), 2);
        assert_eq!(seq.jobs[1].job_number, 2);
        assert_eq!(seq.jobs[1].route, "# freq geom=check");
        assert!(seq.jobs[1].input_deck.starts_with("%chk=water.chk\n"));
    }

    #[test]
    fn test_bad_coordinate_line() {
        let data = "# sp\n\ntitle\n\n0 1\nO 0 0 0\nH 0 zero 1\n\n";
        let err = read(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadInputCoordinates);
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_empty_input_fails() {
        let err = read("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.line(), Some(0));
    }

    #[test]
    fn test_missing_route() {
        let err = read("Water\n\n0 1\nO 0 0 0\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.line(), Some(1));
    }
}

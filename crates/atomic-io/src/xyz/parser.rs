//! XYZ file parser
//!
//! A frame is a count line holding a single unsigned integer, a comment line,
//! then one `element x y z` line per atom. Frames follow each other without
//! separators; each one becomes a numbered step.

use std::io::Read;

use atomic_mol::{Element, Position};

use crate::builder::{StepFields, StepSequenceBuilder};
use crate::error::{IoError, IoResult};
use crate::lines::LineReader;
use crate::sequence::StepSequence;
use crate::traits::{FileFormat, ReadOptions, StepReader};

/// XYZ file reader
pub struct XyzReader<R> {
    lines: LineReader<R>,
    options: ReadOptions,
}

/// Bookkeeping for the frame being read
#[derive(Debug, Default)]
struct Frame {
    declared: usize,
    timestep: Option<i64>,
    expect_comment: bool,
}

impl<R: Read> XyzReader<R> {
    /// Create a new XYZ reader
    pub fn new(reader: R, options: ReadOptions) -> Self {
        XyzReader {
            lines: LineReader::new(reader, FileFormat::Xyz),
            options,
        }
    }

    /// Close the open frame, checking its declared atom count
    fn close_frame(&self, builder: &mut StepSequenceBuilder, frame: &Frame) -> IoResult<()> {
        let found = builder.current_molecule().map_or(0, |m| m.len());
        if found != frame.declared {
            if self.options.strict_frame_counts {
                return Err(self.lines.malformed(format!(
                    "Frame {} declares {} atoms but contains {}",
                    builder.len() + 1,
                    frame.declared,
                    found
                )));
            }
            log::debug!(
                "XYZ frame {} declares {} atoms but contains {}",
                builder.len() + 1,
                frame.declared,
                found
            );
        }
        builder.close_step(StepFields {
            timestep: frame.timestep,
            ..Default::default()
        })?;
        Ok(())
    }

    fn parse_timestep(&self, line: &str) -> Option<i64> {
        let token = line.split_whitespace().last()?;
        match token.parse() {
            Ok(timestep) => Some(timestep),
            Err(_) => {
                log::warn!(
                    "Ignoring unreadable timestep '{}' at line {}",
                    token,
                    self.lines.line_number()
                );
                None
            }
        }
    }
}

impl<R: Read> StepReader for XyzReader<R> {
    fn read_steps(&mut self) -> IoResult<StepSequence> {
        let mut builder = StepSequenceBuilder::numbered(FileFormat::Xyz);
        let mut frame = Frame::default();

        while let Some(line) = self.lines.next_line()? {
            if frame.expect_comment {
                frame.expect_comment = false;
                if line.contains("Timestep") {
                    frame.timestep = self.parse_timestep(&line);
                }
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };

            if tokens.next().is_none() {
                if let Ok(declared) = first.parse::<usize>() {
                    if builder.is_open() {
                        self.close_frame(&mut builder, &frame)?;
                    }
                    builder.open_step()?;
                    // The timestep stays in force until another Timestep line
                    frame = Frame {
                        declared,
                        timestep: frame.timestep,
                        expect_comment: true,
                    };
                    continue;
                }
            }

            if line.contains("Timestep") {
                frame.timestep = self.parse_timestep(&line);
                continue;
            }

            let line_number = self.lines.line_number();
            let molecule = builder.current_molecule().ok_or_else(|| {
                IoError::malformed(
                    FileFormat::Xyz,
                    line_number,
                    "Atom record before the first atom count line",
                )
            })?;
            let (element, position) = parse_atom_line(&line, line_number)?;
            molecule.add_atom(element, position);
        }

        if !builder.is_open() {
            return Err(self.lines.malformed("No frames found"));
        }
        self.close_frame(&mut builder, &frame)?;
        builder.mark_final()?;

        Ok(StepSequence::new(FileFormat::Xyz, builder.finish()?))
    }
}

/// Parse an XYZ atom line
fn parse_atom_line(line: &str, line_number: usize) -> IoResult<(Element, Position)> {
    // Format: element x y z [optional additional columns]
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 4 {
        return Err(IoError::bad_coordinates(
            FileFormat::Xyz,
            line_number,
            format!("Atom line too short: expected 'element x y z', got '{}'", line),
        ));
    }

    let element = Element::from_token(parts[0]).ok_or_else(|| {
        IoError::bad_coordinates(
            FileFormat::Xyz,
            line_number,
            format!("Unknown element '{}'", parts[0]),
        )
    })?;
    let coord = |i: usize, axis: &str| -> IoResult<f64> {
        parts[i].parse().map_err(|_| {
            IoError::bad_coordinates(
                FileFormat::Xyz,
                line_number,
                format!("Invalid {} coordinate '{}'", axis, parts[i]),
            )
        })
    };

    Ok((element, Position::new(coord(1, "x")?, coord(2, "y")?, coord(3, "z")?)))
}

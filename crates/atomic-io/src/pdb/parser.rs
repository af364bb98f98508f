//! PDB file parser
//!
//! Extracts the atoms of the first model, tags backbone atoms and groups
//! atoms into residues. Secondary structure is left to an external
//! [`SecondaryStructureAssigner`](atomic_mol::SecondaryStructureAssigner).

use std::io::Read;

use atomic_mol::{Molecule, Residue};

use crate::builder::{StepFields, StepSequenceBuilder};
use crate::error::IoResult;
use crate::lines::LineReader;
use crate::sequence::StepSequence;
use crate::traits::{FileFormat, ReadOptions, StepReader};

use super::records::{is_water, AtomRecord, ColumnLayout, RecordError};

/// PDB file reader
pub struct PdbReader<R> {
    lines: LineReader<R>,
    options: ReadOptions,
}

impl<R: Read> PdbReader<R> {
    /// Create a new PDB reader
    pub fn new(reader: R, options: ReadOptions) -> Self {
        PdbReader {
            lines: LineReader::new(reader, FileFormat::Pdb),
            options,
        }
    }
}

impl<R: Read> StepReader for PdbReader<R> {
    fn read_steps(&mut self) -> IoResult<StepSequence> {
        let mut layout: Option<ColumnLayout> = None;
        let mut molecule = Molecule::new();
        let mut backbone = Molecule::new();
        let mut residues: Vec<Residue> = Vec::new();

        while let Some(line) = self.lines.next_line()? {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(&record_type) = tokens.first() else {
                continue;
            };

            match record_type {
                "ATOM" => {}
                "HETATM" if self.options.include_hetero => {}
                "HETATM" | "TER" => {
                    log::debug!(
                        "Skipping {} record at line {}",
                        record_type,
                        self.lines.line_number()
                    );
                    continue;
                }
                "ENDMDL" | "END" => break,
                _ => continue,
            }

            // Water is skipped before the column layout is applied
            if tokens.get(3).is_some_and(|resn| is_water(resn)) {
                log::debug!(
                    "Skipping water record at line {}",
                    self.lines.line_number()
                );
                continue;
            }

            let layout = match layout {
                Some(layout) => layout,
                None => {
                    let found = ColumnLayout::from_token_count(tokens.len()).ok_or_else(|| {
                        self.lines.malformed(format!(
                            "Unrecognized atom record layout with {} fields",
                            tokens.len()
                        ))
                    })?;
                    *layout.insert(found)
                }
            };

            let record = AtomRecord::parse(&tokens, layout).map_err(|e| match e {
                RecordError::TooShort(_) => self.lines.malformed(e.to_string()),
                RecordError::Invalid(..) => self.lines.bad_coordinates(e.to_string()),
            })?;

            let element = record.element().ok_or_else(|| {
                self.lines
                    .bad_coordinates(format!("No element for atom name '{}'", record.name))
            })?;

            let sequence_number = if record.is_backbone() {
                backbone.add_annotated_atom(element, record.position, record.name.clone());
                molecule.add_annotated_atom(element, record.position, record.name.clone())
            } else {
                molecule.add_atom(element, record.position)
            };

            let key = record.residue_key();
            match residues.last_mut() {
                Some(residue) if residue.key == key => residue.atoms.push(sequence_number),
                _ => {
                    let mut residue = Residue::new(key);
                    residue.atoms.push(sequence_number);
                    residues.push(residue);
                }
            }
        }

        if molecule.is_empty() {
            return Err(self.lines.malformed("No ATOM records found"));
        }

        let mut builder = StepSequenceBuilder::new(FileFormat::Pdb);
        builder.add_step(
            molecule,
            StepFields {
                is_protein: true,
                backbone: Some(backbone),
                residues: Some(residues),
                ..Default::default()
            },
        )?;
        builder.mark_final()?;

        Ok(StepSequence::new(FileFormat::Pdb, builder.finish()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use atomic_mol::{Element, Position};

    const FRAGMENT: &str = "\
HEADER    TEST FRAGMENT
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  C   ALA A   1      13.144   6.165  -5.185  1.00  0.00           C
ATOM      4  O   ALA A   1      13.742   6.957  -5.908  1.00  0.00           O
ATOM      5  CB  ALA A   1      11.149   7.211  -4.274  1.00  0.00           C
ATOM      6  N   GLY A   2      13.760   5.340  -4.328  1.00  0.00           N
ATOM      7  CA  GLY A   2      15.204   5.281  -4.280  1.00  0.00           C
ATOM      8  C   GLY A   2      15.750   4.107  -3.474  1.00  0.00           C
TER       9      GLY A   2
HETATM   10  O   HOH A 101      20.000  20.000  20.000  1.00  0.00           O
HETATM   11  S   SO4 A 102      18.000   2.000   1.000  1.00  0.00           S
END
";

    fn read(data: &str) -> IoResult<StepSequence> {
        PdbReader::new(data.as_bytes(), ReadOptions::default()).read_steps()
    }

    #[test]
    fn test_read_fragment() {
        let seq = read(FRAGMENT).unwrap();
        assert_eq!(seq.len(), 1);

        let step = &seq.steps[0];
        assert!(step.is_protein);
        assert!(step.is_final_step);
        assert_eq!(step.step_number, None);

        let mol = step.molecule.as_ref().unwrap();
        assert_eq!(mol.len(), 8);
        assert_eq!(mol.get(5).unwrap().element, Element::Carbon);
        assert_eq!(mol.get(4).unwrap().element, Element::Oxygen);
        assert_eq!(mol.get(2).unwrap().annotation.as_deref(), Some("CA"));
        assert_eq!(mol.get(5).unwrap().annotation, None);
    }

    #[test]
    fn test_backbone_order_matches_molecule() {
        let seq = read(FRAGMENT).unwrap();
        let step = &seq.steps[0];
        let mol = step.molecule.as_ref().unwrap();
        let backbone = step.backbone.as_ref().unwrap();

        let names: Vec<_> = backbone
            .atoms()
            .map(|a| a.annotation.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(names, vec!["N", "CA", "C", "N", "CA", "C"]);

        let ca_in_mol: Vec<Position> = mol
            .atoms()
            .filter(|a| a.annotation.as_deref() == Some("CA"))
            .map(|a| a.position)
            .collect();
        let ca_in_backbone: Vec<Position> = backbone
            .atoms()
            .filter(|a| a.annotation.as_deref() == Some("CA"))
            .map(|a| a.position)
            .collect();
        assert_eq!(ca_in_mol, ca_in_backbone);
        assert_eq!(ca_in_mol[1], Position::new(15.204, 5.281, -4.280));
    }

    #[test]
    fn test_residue_grouping() {
        let seq = read(FRAGMENT).unwrap();
        let residues = seq.steps[0].residues.as_ref().unwrap();
        assert_eq!(residues.len(), 2);
        assert_eq!(residues[0].key.to_string(), "A/ALA`1");
        assert_eq!(residues[0].atoms, vec![1, 2, 3, 4, 5]);
        assert_eq!(residues[1].atoms, vec![6, 7, 8]);
        assert!(residues.iter().all(|r| r.structure.is_none()));
    }

    #[test]
    fn test_hetero_option() {
        let options = ReadOptions::new().with_hetero(true);
        let seq = PdbReader::new(FRAGMENT.as_bytes(), options)
            .read_steps()
            .unwrap();
        let mol = seq.steps[0].molecule.as_ref().unwrap();
        // Water stays out, the sulfate comes in
        assert_eq!(mol.len(), 9);
        assert_eq!(mol.get(9).unwrap().element, Element::Sulfur);
    }

    #[test]
    fn test_ten_column_layout() {
        let data = "\
ATOM      1  N   GLY     1       1.000   2.000   3.000  1.00  0.00
ATOM      2  CA  GLY     1       2.000   2.000   3.000  1.00  0.00
";
        let seq = read(data).unwrap();
        let step = &seq.steps[0];
        assert_eq!(step.atom_count(), 2);
        assert_eq!(step.backbone.as_ref().unwrap().len(), 2);
        assert_eq!(step.residues.as_ref().unwrap()[0].key.chain, "");
    }

    #[test]
    fn test_first_model_only() {
        let data = "\
MODEL        1
ATOM      1  N   GLY A   1       1.000   2.000   3.000  1.00  0.00           N
ENDMDL
MODEL        2
ATOM      1  N   GLY A   1       1.500   2.000   3.000  1.00  0.00           N
ENDMDL
";
        let seq = read(data).unwrap();
        assert_eq!(seq.steps[0].atom_count(), 1);
    }

    #[test]
    fn test_unrecognized_layout() {
        let data = "HEADER    X\nATOM      1  N   GLY A   1       1.000   2.000   3.000  1.00 N\n";
        let err = read(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_water_with_merged_columns_is_skipped() {
        let data = "\
ATOM      1  N   ALA A   1       1.000   2.000   3.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       2.000   2.000   3.000  1.00  0.00           C
ATOM  30001  O   WAT W10000     20.000  21.000  22.000  1.00  0.00           O
";
        let seq = read(data).unwrap();
        assert_eq!(seq.steps[0].atom_count(), 2);
        assert_eq!(seq.steps[0].residues.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_coordinate() {
        let data = "\
ATOM      1  N   GLY A   1       1.000   2.000   3.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       2.000   abc     3.000  1.00  0.00           C
";
        let err = read(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadInputCoordinates);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_empty_input_fails() {
        let err = read("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.line(), Some(0));
    }
}

//! Reconstruction of the input deck Gaussian echoes at the top of a log
//!
//! The echo is framed by an asterisk banner, a dashed rule pair around the
//! route and a dashed rule pair around the title. The molecule follows a
//! `Charge = ... Multiplicity = ...` line and ends at a blank line or, for
//! geometries restored from a checkpoint file, at
//! `Recover connectivity data from disk.`.

use super::job::{is_rule, tokens};

/// Whether `feed` consumed the last line of the echo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EchoStatus {
    Continue,
    Finished,
}

/// Accumulates the echoed input deck of one job
#[derive(Debug, Default)]
pub(crate) struct InputEcho {
    asterisk_count: u32,
    input_separator_count: u32,
    title_separator_count: u32,
    in_molecule: bool,
    old_form: bool,
    finished: bool,
    pub link0: Vec<String>,
    pub route: Vec<String>,
    pub title: Vec<String>,
    pub charge: Option<i32>,
    pub multiplicity: Option<u32>,
    atoms: Vec<String>,
}

impl InputEcho {
    /// Echo of the first job, preceded by the asterisk banner
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo of a `Link1` job, which repeats no banner
    pub fn after_banner() -> Self {
        InputEcho {
            asterisk_count: 2,
            ..Self::default()
        }
    }

    /// End the echo early (an orientation block started)
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Consume one log line
    pub fn feed(&mut self, line: &str) -> EchoStatus {
        if self.finished {
            return EchoStatus::Finished;
        }
        let trimmed = line.trim();

        if self.asterisk_count < 2 {
            if is_rule(trimmed, '*') {
                self.asterisk_count += 1;
            }
            return EchoStatus::Continue;
        }

        if self.input_separator_count < 2 {
            if is_rule(trimmed, '-') {
                self.input_separator_count += 1;
            } else if self.input_separator_count == 0 {
                if trimmed.starts_with('%') {
                    self.link0.push(trimmed.to_string());
                }
            } else {
                self.route.push(trimmed.to_string());
            }
            return EchoStatus::Continue;
        }

        if self.title_separator_count < 2 {
            if is_rule(trimmed, '-') {
                self.title_separator_count += 1;
            } else if self.title_separator_count == 1 {
                self.title.push(trimmed.to_string());
            }
            return EchoStatus::Continue;
        }

        if trimmed.contains("Recover connectivity data from disk.") {
            self.finished = true;
            return EchoStatus::Finished;
        }

        if !self.in_molecule {
            if trimmed.starts_with("Charge =") {
                if let Some((charge, multiplicity)) = parse_charge_line(trimmed) {
                    self.charge = Some(charge);
                    self.multiplicity = Some(multiplicity);
                }
                self.in_molecule = true;
            }
            return EchoStatus::Continue;
        }

        if trimmed.contains("old form") {
            self.old_form = true;
            return EchoStatus::Continue;
        }
        if trimmed.is_empty() {
            self.finished = true;
            return EchoStatus::Finished;
        }

        if self.old_form {
            // Sym,flag,x,y,z
            let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
            if fields.len() >= 4 {
                let n = fields.len();
                self.atoms
                    .push(format!("{} {} {} {}", fields[0], fields[n - 3], fields[n - 2], fields[n - 1]));
            } else {
                self.atoms.push(trimmed.to_string());
            }
        } else {
            self.atoms.push(trimmed.to_string());
        }
        EchoStatus::Continue
    }

    /// Rebuild the input deck, `None` when no molecule was echoed
    pub fn deck(&self) -> Option<String> {
        let (charge, multiplicity) = (self.charge?, self.multiplicity?);
        if self.atoms.is_empty() {
            return None;
        }

        let mut deck = String::new();
        for line in &self.link0 {
            deck.push_str(line);
            deck.push('\n');
        }
        deck.push_str(&self.route.join(" "));
        deck.push_str("\n\n");
        deck.push_str(&self.title.join(" "));
        deck.push_str("\n\n");
        deck.push_str(&format!("{} {}\n", charge, multiplicity));
        for line in &self.atoms {
            deck.push_str(line);
            deck.push('\n');
        }
        deck.push('\n');
        Some(deck)
    }
}

/// Parse `Charge =  0 Multiplicity = 1`
fn parse_charge_line(line: &str) -> Option<(i32, u32)> {
    let parts: Vec<&str> = tokens(line).collect();
    let value_after = |key: &str| {
        let i = parts.iter().position(|t| *t == key)?;
        match parts.get(i + 1) {
            Some(&"=") => parts.get(i + 2).copied(),
            other => other.and_then(|t| t.strip_prefix('=')),
        }
    };
    let charge = value_after("Charge")?.parse().ok()?;
    let multiplicity = value_after("Multiplicity")?.parse().ok()?;
    Some((charge, multiplicity))
}

//! Gaussian job metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a Gaussian job ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Termination {
    /// `Normal termination of Gaussian`
    Normal,
    /// `Error termination`
    Error,
    /// No termination line was found
    #[default]
    Missing,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Normal => "normal termination",
            Termination::Error => "error termination",
            Termination::Missing => "no termination line",
        };
        f.write_str(s)
    }
}

/// One job of a Gaussian input deck or log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    /// 1-based job index (`--Link1--` starts a new job)
    pub job_number: u32,
    /// Link 0 commands (`%chk=...`, `%mem=...`)
    pub link0: Vec<String>,
    /// Route section, joined into one line
    pub route: String,
    /// Title section, joined into one line
    pub title: String,
    /// Total charge
    pub charge: Option<i32>,
    /// Spin multiplicity
    pub multiplicity: Option<u32>,
    /// Input deck text; for logs, the deck reconstructed from the echo
    pub input_deck: String,
    /// How the job ended (always `Missing` for input files)
    pub termination: Termination,
}

impl JobInfo {
    /// Create empty metadata for job `job_number`
    pub fn new(job_number: u32) -> Self {
        JobInfo {
            job_number,
            link0: Vec::new(),
            route: String::new(),
            title: String::new(),
            charge: None,
            multiplicity: None,
            input_deck: String::new(),
            termination: Termination::Missing,
        }
    }

    /// Whether the route requests a keyword, ignoring case (`opt`, `freq`)
    ///
    /// Matches the keyword itself and its option forms (`opt=(calcfc)`).
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.route
            .split(|c: char| c.is_whitespace() || c == '/')
            .map(|token| token.split(['=', '(']).next().unwrap_or(token))
            .any(|token| token.eq_ignore_ascii_case(keyword))
    }
}

/// Split a Gaussian input line into tokens
///
/// Gaussian accepts commas as well as whitespace between fields.
pub(crate) fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

/// Whether a trimmed line is a horizontal rule made of `c` (`-----`, `*****`)
pub(crate) fn is_rule(line: &str, c: char) -> bool {
    line.len() >= 3 && line.chars().all(|ch| ch == c)
}

/// Parse the first two integers of a charge/multiplicity line (`0 1`, `-1,2`)
pub(crate) fn parse_charge_multiplicity(line: &str) -> Option<(i32, u32)> {
    let mut it = tokens(line);
    let charge = it.next()?.parse().ok()?;
    let multiplicity = it.next()?.parse().ok()?;
    Some((charge, multiplicity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_keyword() {
        let mut job = JobInfo::new(1);
        job.route = "#p opt=(calcfc,tight) Freq b3lyp/6-31g(d)".to_string();
        assert!(job.has_keyword("opt"));
        assert!(job.has_keyword("freq"));
        assert!(job.has_keyword("B3LYP"));
        assert!(!job.has_keyword("irc"));
    }

    #[test]
    fn test_is_rule() {
        assert!(is_rule("----------", '-'));
        assert!(is_rule("*****", '*'));
        assert!(!is_rule("--Link1--", '-'));
        assert!(!is_rule("--", '-'));
        assert!(!is_rule("", '-'));
    }

    #[test]
    fn test_parse_charge_multiplicity() {
        assert_eq!(parse_charge_multiplicity("0 1"), Some((0, 1)));
        assert_eq!(parse_charge_multiplicity("-1,2"), Some((-1, 2)));
        assert_eq!(parse_charge_multiplicity("0 1 0 1 0 1"), Some((0, 1)));
        assert_eq!(parse_charge_multiplicity("O 0 0 0"), None);
        assert_eq!(parse_charge_multiplicity("0"), None);
    }

    #[test]
    fn test_termination_default() {
        assert_eq!(JobInfo::new(2).termination, Termination::Missing);
        assert_eq!(Termination::Error.to_string(), "error termination");
    }
}

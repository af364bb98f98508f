//! File format detection
//!
//! Formats are chosen from the file extension only. The one place content
//! matters is a `.log` file, whose producing program is recognised from its
//! banner by [`LogDialect::sniff`].

use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::traits::FileFormat;

/// Detect file format from a file path (by extension)
pub fn detect_from_path(path: &Path) -> IoResult<FileFormat> {
    FileFormat::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        IoError::unsupported(
            path.to_string_lossy(),
            format!("no reader for extension '{ext}'"),
        )
    })
}

/// Detect file format from a bare extension (`"xyz"`, `"COM"`, ...)
pub fn detect_from_extension(ext: &str) -> IoResult<FileFormat> {
    FileFormat::from_extension(ext)
        .ok_or_else(|| IoError::unsupported(ext, "no reader for this extension"))
}

/// Program that wrote a quantum chemistry log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDialect {
    /// Gaussian 03/09/16 output
    Gaussian,
    /// GAMESS output (recognised, not readable)
    Gamess,
}

impl LogDialect {
    /// Recognise a program banner line
    pub fn sniff(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.contains("Entering Gaussian System")
            || trimmed.contains("Gaussian, Inc.")
            || is_gaussian_version_banner(trimmed)
        {
            Some(LogDialect::Gaussian)
        } else if trimmed.contains("GAMESS") {
            Some(LogDialect::Gamess)
        } else {
            None
        }
    }
}

/// `Gaussian 16:  ES64L-G16RevA.03 25-Dec-2016`
fn is_gaussian_version_banner(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    tokens.next() == Some("Gaussian")
        && tokens.next().is_some_and(|version| {
            version
                .strip_suffix(':')
                .is_some_and(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_detect_from_path() {
        assert_eq!(detect_from_path(Path::new("water.xyz")).unwrap(), FileFormat::Xyz);
        assert_eq!(detect_from_path(Path::new("opt.com")).unwrap(), FileFormat::Gjf);
        assert_eq!(detect_from_path(Path::new("freq.qfi")).unwrap(), FileFormat::Log);
        assert_eq!(detect_from_path(Path::new("1crn.PDB")).unwrap(), FileFormat::Pdb);

        let err = detect_from_path(Path::new("ligand.sdf")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        let err = detect_from_path(Path::new("no_extension")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(detect_from_extension("gjf").unwrap(), FileFormat::Gjf);
        assert!(detect_from_extension("cif").is_err());
    }

    #[test]
    fn test_sniff_dialect() {
        assert_eq!(
            LogDialect::sniff(" Entering Gaussian System, Link 0=g16"),
            Some(LogDialect::Gaussian)
        );
        assert_eq!(
            LogDialect::sniff(" Gaussian 09:  ES64L-G09RevD.01 24-Apr-2013"),
            Some(LogDialect::Gaussian)
        );
        assert_eq!(
            LogDialect::sniff(" Copyright (c) 1988-2017, Gaussian, Inc.  All Rights Reserved."),
            Some(LogDialect::Gaussian)
        );
        assert_eq!(
            LogDialect::sniff("          *         GAMESS VERSION = 30 SEP 2019 (R2)         *"),
            Some(LogDialect::Gamess)
        );
        assert_eq!(LogDialect::sniff(" Gaussian basis set"), None);
        assert_eq!(LogDialect::sniff(" SCF Done:  E(RHF) =  -1.0"), None);
    }
}

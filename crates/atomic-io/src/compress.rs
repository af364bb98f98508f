//! Compression support
//!
//! Files ending in `.gz` are decompressed while they are read.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::IoResult;

/// Whether the last extension of `path` is `.gz` (any case)
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Open a file for reading, decompressing when the path ends in `.gz`
pub fn open_file(path: &Path) -> IoResult<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    if is_gzip_path(path) {
        log::debug!("Decompressing {}", path.display());
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

// src/io/mod.rs
pub mod cif;
pub mod poscar;
pub mod xyz;

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Structure;

/// Read a structure file. The format is an explicit tag supplied by the
/// caller, not sniffed from the file extension.
pub fn read(path: &Path, format: &str) -> Result<Structure> {
    match format.to_ascii_lowercase().as_str() {
        "vasp" | "poscar" | "contcar" => poscar::parse(path),
        "xyz" | "extxyz" => xyz::parse(path),
        "cif" => cif::parse(path),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

pub(crate) fn parse_err(path: &Path, reason: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

pub(crate) fn next_line(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    path: &Path,
    what: &str,
) -> Result<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(parse_err(path, format!("unexpected end of file ({})", what))),
    }
}

/// First three whitespace-separated floats on a line, if present.
pub(crate) fn parse_vec3(line: &str) -> Option<[f64; 3]> {
    let mut it = line.split_whitespace();
    let x = it.next()?.parse().ok()?;
    let y = it.next()?.parse().ok()?;
    let z = it.next()?.parse().ok()?;
    Some([x, y, z])
}

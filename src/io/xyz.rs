// src/io/xyz.rs

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::io::{next_line, parse_err};
use crate::model::{Atom, Structure};

/// Lattice used when an XYZ file carries no cell information: a large
/// box so downstream replication stays well-defined.
const DEFAULT_BOX: f64 = 20.0;

pub fn parse(path: &Path) -> Result<Structure> {
    let file = File::open(path)?;
    let mut lines = io::BufReader::new(file).lines();

    // 1. Number of atoms
    let n_atoms: usize = next_line(&mut lines, path, "atom count")?
        .trim()
        .parse()
        .map_err(|_| parse_err(path, "invalid atom count"))?;

    // 2. Comment line, possibly carrying an extended-XYZ Lattice="..." entry
    let comment = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };

    let mut lattice = [
        [DEFAULT_BOX, 0.0, 0.0],
        [0.0, DEFAULT_BOX, 0.0],
        [0.0, 0.0, DEFAULT_BOX],
    ];
    if let Some(cell) = extract_lattice(&comment) {
        lattice = cell;
    }

    // 3. Atoms: "El x y z" per line
    let mut atoms = Vec::with_capacity(n_atoms);
    for line in lines {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }
        let x: f64 = parts[1]
            .parse()
            .map_err(|_| parse_err(path, "invalid x coordinate"))?;
        let y: f64 = parts[2]
            .parse()
            .map_err(|_| parse_err(path, "invalid y coordinate"))?;
        let z: f64 = parts[3]
            .parse()
            .map_err(|_| parse_err(path, "invalid z coordinate"))?;
        atoms.push(Atom {
            element: parts[0].to_string(),
            position: [x, y, z],
        });
        if atoms.len() == n_atoms {
            break;
        }
    }

    if atoms.len() != n_atoms {
        return Err(parse_err(
            path,
            format!("expected {} atoms, found {}", n_atoms, atoms.len()),
        ));
    }

    debug!("Read {} atoms from XYZ {:?}", atoms.len(), path);

    Ok(Structure {
        lattice,
        atoms,
        comment: comment.trim().to_string(),
    })
}

// Extended XYZ: Lattice="ax ay az bx by bz cx cy cz"
fn extract_lattice(comment: &str) -> Option<[[f64; 3]; 3]> {
    let start = comment.find("Lattice=\"")?;
    let remainder = &comment[start + 9..];
    let end = remainder.find('"')?;
    let values: Vec<f64> = remainder[..end]
        .split_whitespace()
        .filter_map(|t| t.parse().ok())
        .collect();
    if values.len() != 9 {
        return None;
    }
    Some([
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
        [values[6], values[7], values[8]],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_lattice() {
        let cell = extract_lattice("Lattice=\"1 0 0 0 2 0 0 0 3\" Properties=species:S:1").unwrap();
        assert_eq!(cell[0], [1.0, 0.0, 0.0]);
        assert_eq!(cell[1], [0.0, 2.0, 0.0]);
        assert_eq!(cell[2], [0.0, 0.0, 3.0]);
        assert!(extract_lattice("plain comment").is_none());
        assert!(extract_lattice("Lattice=\"1 2 3\"").is_none());
    }

    #[test]
    fn test_parse_extended_xyz() {
        let path = std::env::temp_dir().join("tb_structure_test.xyz");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            "2\nLattice=\"5 0 0 0 5 0 0 0 5\"\nC 0.0 0.0 0.0\nC 1.25 1.25 1.25\n"
        )
        .unwrap();

        let s = parse(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(s.len(), 2);
        assert_eq!(s.atoms[0].element, "C");
        assert!((s.lattice[1][1] - 5.0).abs() < 1e-10);
        assert!((s.atoms[1].position[2] - 1.25).abs() < 1e-10);
    }

    #[test]
    fn test_atom_count_mismatch() {
        let path = std::env::temp_dir().join("tb_structure_short.xyz");
        let mut file = File::create(&path).unwrap();
        write!(file, "3\ncomment\nH 0 0 0\n").unwrap();

        let err = parse(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("expected 3 atoms"));
    }
}

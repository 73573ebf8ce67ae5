// src/io/poscar.rs

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::io::{next_line, parse_err, parse_vec3};
use crate::model::{Atom, Structure};
use crate::utils::linalg::frac_to_cart;

pub fn parse(path: &Path) -> Result<Structure> {
    let file = File::open(path)?;
    let mut lines = io::BufReader::new(file).lines();

    // Comment
    let comment = next_line(&mut lines, path, "comment")?;

    // Scale
    let scale: f64 = next_line(&mut lines, path, "scaling factor")?
        .trim()
        .parse()
        .map_err(|_| parse_err(path, "invalid scaling factor"))?;

    // Lattice
    let mut lattice = [[0.0; 3]; 3];
    for row in lattice.iter_mut() {
        let line = next_line(&mut lines, path, "lattice vector")?;
        let v = parse_vec3(&line).ok_or_else(|| parse_err(path, "invalid lattice vector"))?;
        row[0] = v[0] * scale;
        row[1] = v[1] * scale;
        row[2] = v[2] * scale;
    }

    // Element symbols line is optional (VASP 4 files go straight to counts)
    let first = next_line(&mut lines, path, "atom counts")?;
    let has_symbols = first
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic());
    let (symbols_line, counts_line) = if has_symbols {
        let counts = next_line(&mut lines, path, "atom counts")?;
        (first, counts)
    } else {
        (String::new(), first)
    };

    let symbols: Vec<&str> = symbols_line.split_whitespace().collect();
    let counts = counts_line
        .split_whitespace()
        .map(|t| t.parse::<usize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| parse_err(path, "invalid atom counts"))?;

    // Coordinate mode, with an optional "Selective dynamics" line before it
    let mut mode = next_line(&mut lines, path, "coordinate mode")?;
    if mode.trim().to_lowercase().starts_with('s') {
        mode = next_line(&mut lines, path, "coordinate mode")?;
    }
    // VASP: Cartesian if the line starts with 'c' or 'k', Direct otherwise
    let first_char = mode.trim().to_lowercase().chars().next().unwrap_or('d');
    let is_direct = first_char != 'c' && first_char != 'k';

    // Atoms, grouped per element block
    let mut atoms = Vec::new();
    for (block, &count) in counts.iter().enumerate() {
        let element = symbols.get(block).copied().unwrap_or("X").to_string();
        for _ in 0..count {
            let line = next_line(&mut lines, path, "atom position")?;
            let v = parse_vec3(&line).ok_or_else(|| parse_err(path, "invalid atom position"))?;
            let position = if is_direct {
                frac_to_cart(v, lattice)
            } else {
                [v[0] * scale, v[1] * scale, v[2] * scale]
            };
            atoms.push(Atom {
                element: element.clone(),
                position,
            });
        }
    }

    debug!("Read {} atoms from POSCAR {:?}", atoms.len(), path);

    Ok(Structure {
        lattice,
        atoms,
        comment: comment.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_direct() {
        let path = write_fixture(
            "tb_structure_poscar_direct.vasp",
            "NaCl rocksalt\n\
             1.0\n\
             4.0 0.0 0.0\n\
             0.0 4.0 0.0\n\
             0.0 0.0 4.0\n\
             Na Cl\n\
             1 1\n\
             Direct\n\
             0.0 0.0 0.0\n\
             0.5 0.5 0.5\n",
        );
        let s = parse(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(s.len(), 2);
        assert_eq!(s.atoms[0].element, "Na");
        assert_eq!(s.atoms[1].element, "Cl");
        assert!((s.atoms[1].position[0] - 2.0).abs() < 1e-10);
        assert!((s.atoms[1].position[2] - 2.0).abs() < 1e-10);
        assert_eq!(s.comment, "NaCl rocksalt");
    }

    #[test]
    fn test_parse_cartesian_no_symbols() {
        // VASP 4 layout: no element symbols line
        let path = write_fixture(
            "tb_structure_poscar_v4.vasp",
            "cubic\n\
             2.0\n\
             1.0 0.0 0.0\n\
             0.0 1.0 0.0\n\
             0.0 0.0 1.0\n\
             1\n\
             Cartesian\n\
             0.5 0.5 0.5\n",
        );
        let s = parse(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(s.len(), 1);
        assert_eq!(s.atoms[0].element, "X");
        // Scale applies to both lattice and Cartesian positions
        assert!((s.lattice[0][0] - 2.0).abs() < 1e-10);
        assert!((s.atoms[0].position[0] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_truncated_file() {
        let path = write_fixture("tb_structure_poscar_trunc.vasp", "comment\n1.0\n");
        let err = parse(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("unexpected end of file"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse(Path::new("/nonexistent/POSCAR")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}

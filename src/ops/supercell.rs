// src/ops/supercell.rs

use log::info;

use crate::error::{Error, Result};
use crate::model::Structure;

/// Stack `nx × ny × nz` periodic copies of the cell along its three
/// lattice vectors. Atom order: translation cells in (x, y, z) loop
/// order, the original atom order within each copy.
pub fn generate(structure: &Structure, nx: u32, ny: u32, nz: u32) -> Structure {
    let num_copies = (nx as usize) * (ny as usize) * (nz as usize);
    let mut new_atoms = Vec::with_capacity(structure.len() * num_copies);

    let vec_a = structure.lattice[0];
    let vec_b = structure.lattice[1];
    let vec_c = structure.lattice[2];

    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let translation = [
                    vec_a[0] * x as f64 + vec_b[0] * y as f64 + vec_c[0] * z as f64,
                    vec_a[1] * x as f64 + vec_b[1] * y as f64 + vec_c[1] * z as f64,
                    vec_a[2] * x as f64 + vec_b[2] * y as f64 + vec_c[2] * z as f64,
                ];

                for atom in &structure.atoms {
                    let mut new_atom = atom.clone();
                    new_atom.position[0] += translation[0];
                    new_atom.position[1] += translation[1];
                    new_atom.position[2] += translation[2];
                    new_atoms.push(new_atom);
                }
            }
        }
    }

    let new_lattice = [
        [vec_a[0] * nx as f64, vec_a[1] * nx as f64, vec_a[2] * nx as f64],
        [vec_b[0] * ny as f64, vec_b[1] * ny as f64, vec_b[2] * ny as f64],
        [vec_c[0] * nz as f64, vec_c[1] * nz as f64, vec_c[2] * nz as f64],
    ];

    info!(
        "Generated {}x{}x{} supercell: {} atoms",
        nx,
        ny,
        nz,
        new_atoms.len()
    );

    Structure {
        lattice: new_lattice,
        atoms: new_atoms,
        comment: format!("{} ({}x{}x{} supercell)", structure.comment, nx, ny, nz),
    }
}

/// Repetition counts that fit target physical lengths (same units as the
/// cell) along each lattice direction: `floor(length / cell_length)` per
/// axis. A target shorter than the cell yields zero copies on that axis.
pub fn repetitions_from_lengths(structure: &Structure, lengths: [f64; 3]) -> Result<(u32, u32, u32)> {
    let cell = structure.lattice_lengths();
    let mut reps = [0u32; 3];
    for (axis, rep) in reps.iter_mut().enumerate() {
        if cell[axis] <= f64::EPSILON {
            return Err(Error::DegenerateCell {
                axis: ['a', 'b', 'c'][axis],
            });
        }
        *rep = (lengths[axis] / cell[axis]).floor() as u32;
    }
    Ok((reps[0], reps[1], reps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;

    fn two_atom_cell() -> Structure {
        Structure {
            lattice: [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]],
            atoms: vec![
                Atom {
                    element: "Ga".to_string(),
                    position: [0.0, 0.0, 0.0],
                },
                Atom {
                    element: "As".to_string(),
                    position: [1.0, 1.5, 2.0],
                },
            ],
            comment: "GaAs".to_string(),
        }
    }

    #[test]
    fn test_generate_counts_and_lattice() {
        let cell = two_atom_cell();
        let sc = generate(&cell, 2, 1, 3);

        assert_eq!(sc.len(), 2 * 2 * 1 * 3);
        assert!((sc.lattice[0][0] - 4.0).abs() < 1e-10);
        assert!((sc.lattice[1][1] - 3.0).abs() < 1e-10);
        assert!((sc.lattice[2][2] - 12.0).abs() < 1e-10);
        // Input untouched
        assert_eq!(cell.len(), 2);
    }

    #[test]
    fn test_generate_translations() {
        let cell = two_atom_cell();
        let sc = generate(&cell, 2, 1, 1);

        // First copy at the origin, second shifted by one a-vector
        assert_eq!(sc.atoms[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(sc.atoms[1].position, [1.0, 1.5, 2.0]);
        assert_eq!(sc.atoms[2].position, [2.0, 0.0, 0.0]);
        assert_eq!(sc.atoms[3].position, [3.0, 1.5, 2.0]);
        assert_eq!(sc.atoms[2].element, "Ga");
    }

    #[test]
    fn test_identity_repetition() {
        let cell = two_atom_cell();
        let sc = generate(&cell, 1, 1, 1);
        assert_eq!(sc.atoms, cell.atoms);
        assert_eq!(sc.lattice, cell.lattice);
    }

    #[test]
    fn test_repetitions_from_lengths() {
        let cell = two_atom_cell();
        // Cell lengths are (2, 3, 4); floor division throughout
        let reps = repetitions_from_lengths(&cell, [10.0, 10.0, 10.0]).unwrap();
        assert_eq!(reps, (5, 3, 2));

        // Targets shorter than the cell floor to zero copies
        let reps = repetitions_from_lengths(&cell, [1.0, 3.0, 4.5]).unwrap();
        assert_eq!(reps, (0, 1, 1));
    }

    #[test]
    fn test_degenerate_cell() {
        let mut cell = two_atom_cell();
        cell.lattice[1] = [0.0, 0.0, 0.0];
        let err = repetitions_from_lengths(&cell, [1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::DegenerateCell { axis: 'b' }));
    }
}

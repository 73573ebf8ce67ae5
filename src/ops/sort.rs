// src/ops/sort.rs

use crate::model::Structure;

/// Order atoms by position: x first, then y, then z, ascending. Ties keep
/// their original relative order (`sort_by` is stable, so a single
/// composite-key pass suffices). Returns a new structure; the input is
/// left untouched.
pub fn sort_atoms(structure: &Structure) -> Structure {
    let mut atoms = structure.atoms.clone();
    atoms.sort_by(|p, q| {
        p.position[0]
            .total_cmp(&q.position[0])
            .then(p.position[1].total_cmp(&q.position[1]))
            .then(p.position[2].total_cmp(&q.position[2]))
    });

    Structure {
        lattice: structure.lattice,
        atoms,
        comment: structure.comment.clone(),
    }
}

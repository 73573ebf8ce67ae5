use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    /// Cartesian position [x, y, z] in Angstroms.
    pub position: [f64; 3],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Structure {
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: [[f64; 3]; 3],
    pub atoms: Vec<Atom>,
    // Provenance note (e.g. "POSCAR Import", supercell annotation)
    #[serde(skip)]
    pub comment: String,
}

impl Structure {
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Magnitudes of the three lattice vectors (a, b, c) in Angstroms.
    pub fn lattice_lengths(&self) -> [f64; 3] {
        [
            Vector3::from(self.lattice[0]).norm(),
            Vector3::from(self.lattice[1]).norm(),
            Vector3::from(self.lattice[2]).norm(),
        ]
    }
}

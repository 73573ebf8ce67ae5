// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

/// Convert fractional coordinates to Cartesian using the lattice matrix.
///
/// # Arguments
/// * `frac` - Fractional coordinates [x, y, z]
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
///
/// # Returns
/// Cartesian coordinates in Angstroms
///
/// # Formula
/// ```text
/// Cartesian = Lattice^T × Fractional
/// ```
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let frac_vec = Vector3::from(frac);
  let lat_mat = Matrix3::from_fn(|row, col| lattice[row][col]);

  let cart_vec = lat_mat.transpose() * frac_vec;

  [cart_vec.x, cart_vec.y, cart_vec.z]
}

// src/lib.rs

//! Structure preparation for tight-binding Hamiltonian construction.
//!
//! Loads a unit cell (POSCAR, XYZ or CIF) and optionally replicates it
//! into a supercell, or loads a pre-built structure file directly. Atoms
//! are deterministically ordered by position so downstream Hamiltonian
//! indices are reproducible.
//!
//! ```no_run
//! use tb_structure::{get_structure, StructureConfig};
//!
//! let config = StructureConfig {
//!     unit_cell_filepath: Some("POSCAR".into()),
//!     repetitions: Some((4, 4, 1)),
//!     ..Default::default()
//! };
//! let supercell = get_structure(&config)?;
//! # Ok::<(), tb_structure::Error>(())
//! ```

pub mod builder;
pub mod error;
pub mod io;
pub mod model;
pub mod ops;
pub mod utils;

pub use builder::{get_structure, StructureConfig};
pub use error::{Error, Result};
pub use model::{Atom, Structure};
pub use ops::sort_atoms;

// src/builder.rs

use std::path::PathBuf;

use log::info;

use crate::error::{Error, Result};
use crate::io;
use crate::model::Structure;
use crate::ops::{sort_atoms, supercell};

/// Source selection and replication options for [`get_structure`].
///
/// Exactly one source is needed; `unit_cell_filepath` wins when both are
/// set. With a unit-cell source, `repetitions` wins over `lengths`.
#[derive(Clone, Debug)]
pub struct StructureConfig {
    /// Path to a unit cell file.
    pub unit_cell_filepath: Option<PathBuf>,
    /// Format tag for the unit cell file ("vasp" by default).
    pub unit_cell_file_format: String,
    /// Copies of the unit cell to stack along each lattice direction.
    pub repetitions: Option<(u32, u32, u32)>,
    /// Target supercell lengths, same units as the cell. Converted to
    /// repetition counts by floor division with the cell lengths.
    pub lengths: Option<[f64; 3]>,
    /// Path to a pre-built structure file.
    pub structure_filepath: Option<PathBuf>,
    /// Format tag for the structure file ("vasp" by default).
    pub structure_file_format: String,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            unit_cell_filepath: None,
            unit_cell_file_format: "vasp".to_string(),
            repetitions: None,
            lengths: None,
            structure_filepath: None,
            structure_file_format: "vasp".to_string(),
        }
    }
}

/// Build a structure ready for tight-binding Hamiltonian construction.
///
/// A unit-cell source may be replicated into a supercell, either by
/// explicit repetition counts or by target lengths. Replicated structures
/// are returned in replication order; a bare unit cell or a pre-built
/// structure file comes back sorted by position (x, then y, then z).
pub fn get_structure(config: &StructureConfig) -> Result<Structure> {
    if let Some(path) = &config.unit_cell_filepath {
        let unit_cell = io::read(path, &config.unit_cell_file_format)?;
        info!(
            "Loaded unit cell ({} atoms) from {:?}",
            unit_cell.len(),
            path
        );

        if let Some((nx, ny, nz)) = config.repetitions {
            return Ok(supercell::generate(&unit_cell, nx, ny, nz));
        }
        if let Some(lengths) = config.lengths {
            let (nx, ny, nz) = supercell::repetitions_from_lengths(&unit_cell, lengths)?;
            return Ok(supercell::generate(&unit_cell, nx, ny, nz));
        }
        return Ok(sort_atoms(&unit_cell));
    }

    if let Some(path) = &config.structure_filepath {
        // Reader failures pass through untouched
        let structure = io::read(path, &config.structure_file_format)?;
        info!(
            "Loaded structure ({} atoms) from {:?}",
            structure.len(),
            path
        );
        return Ok(sort_atoms(&structure));
    }

    Err(Error::MissingSource)
}

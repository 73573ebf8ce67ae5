// src/ops/mod.rs
pub mod sort;
pub mod supercell;

pub use sort::sort_atoms;
pub use supercell::{generate, repetitions_from_lengths};

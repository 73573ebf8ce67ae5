// src/error.rs

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("either a unit cell path or a structure file path must be provided")]
    MissingSource,

    #[error("unsupported structure file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("unit cell length along {axis} is zero; cannot derive repetitions from lengths")]
    DegenerateCell { axis: char },

    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

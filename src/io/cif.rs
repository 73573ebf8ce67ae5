// src/io/cif.rs
//
// Minimal CIF reader: cell parameters plus the _atom_site loop, taken as
// given (P1). Symmetry-generated positions are not expanded; files meant
// for tight-binding setups carry the full atom list.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::io::parse_err;
use crate::model::{Atom, Structure};
use crate::utils::linalg::frac_to_cart;

pub fn parse(path: &Path) -> Result<Structure> {
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);

    let mut a = 0.0;
    let mut b = 0.0;
    let mut c = 0.0;
    let mut alpha = 90.0;
    let mut beta = 90.0;
    let mut gamma = 90.0;

    let mut frac_atoms: Vec<(String, [f64; 3])> = Vec::new();

    let mut in_loop = false;
    let mut headers: Vec<String> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // 1. Cell parameters
        if let Some(value) = tagged_number(trimmed, "_cell_length_a") {
            a = value;
        } else if let Some(value) = tagged_number(trimmed, "_cell_length_b") {
            b = value;
        } else if let Some(value) = tagged_number(trimmed, "_cell_length_c") {
            c = value;
        } else if let Some(value) = tagged_number(trimmed, "_cell_angle_alpha") {
            alpha = value;
        } else if let Some(value) = tagged_number(trimmed, "_cell_angle_beta") {
            beta = value;
        } else if let Some(value) = tagged_number(trimmed, "_cell_angle_gamma") {
            gamma = value;
        }

        // 2. Loop handling
        if trimmed.starts_with("loop_") {
            in_loop = true;
            headers.clear();
            continue;
        }
        if !in_loop {
            continue;
        }
        if trimmed.starts_with('_') {
            headers.push(trimmed.to_string());
            continue;
        }
        if trimmed.starts_with("data_") {
            in_loop = false;
            continue;
        }

        // 3. Data rows of the atom-site loop
        if !headers.iter().any(|h| h.contains("_atom_site_fract_x")) {
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() < headers.len().min(4) {
            continue;
        }

        let mut element = String::from("X");
        let mut frac = [0.0; 3];
        for (i, header) in headers.iter().enumerate() {
            let Some(&value) = parts.get(i) else { break };
            if header.contains("_atom_site_type_symbol") || header.contains("_atom_site_label") {
                // "Fe1" -> "Fe"; type_symbol wins if both columns exist,
                // since it is scanned after label only when label came first
                let symbol: String = value.chars().filter(|ch| ch.is_alphabetic()).collect();
                if header.contains("_atom_site_type_symbol") || element == "X" {
                    element = symbol;
                }
            } else if header.contains("_atom_site_fract_x") {
                frac[0] = cif_number(value);
            } else if header.contains("_atom_site_fract_y") {
                frac[1] = cif_number(value);
            } else if header.contains("_atom_site_fract_z") {
                frac[2] = cif_number(value);
            }
        }
        frac_atoms.push((element, frac));
    }

    if a <= 0.0 || b <= 0.0 || c <= 0.0 {
        return Err(parse_err(path, "missing or invalid cell parameters"));
    }

    let lattice = lattice_from_parameters(a, b, c, alpha, beta, gamma);

    let atoms: Vec<Atom> = frac_atoms
        .into_iter()
        .map(|(element, frac)| Atom {
            element,
            position: frac_to_cart(frac, lattice),
        })
        .collect();

    debug!("Read {} atoms from CIF {:?}", atoms.len(), path);

    Ok(Structure {
        lattice,
        atoms,
        comment: "CIF Import".to_string(),
    })
}

/// Value of a `_tag value` line, uncertainty suffix stripped.
fn tagged_number(line: &str, tag: &str) -> Option<f64> {
    let rest = line.strip_prefix(tag)?;
    // Reject longer tags sharing the prefix, e.g. _cell_length_a_su
    if rest.starts_with(|ch: char| ch == '_' || ch.is_alphanumeric()) {
        return None;
    }
    Some(cif_number(rest.trim()))
}

// CIF numbers may carry an uncertainty in parentheses: "5.431(2)"
fn cif_number(token: &str) -> f64 {
    let bare = match token.find('(') {
        Some(i) => &token[..i],
        None => token,
    };
    bare.parse().unwrap_or(0.0)
}

/// Lattice row vectors from cell lengths (Angstroms) and angles (degrees),
/// in the standard orientation: a along x, b in the xy plane.
fn lattice_from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> [[f64; 3]; 3] {
    let (alpha, beta, gamma) = (alpha.to_radians(), beta.to_radians(), gamma.to_radians());

    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();

    [
        [a, 0.0, 0.0],
        [b * gamma.cos(), b * gamma.sin(), 0.0],
        [cx, cy, cz],
    ]
}

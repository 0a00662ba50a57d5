//! TOML system files.
//!
//! A system file lists the fragments of a model system, the identity of the complex they
//! compose into, and optionally energies recorded by an earlier solver run:
//!
//! ```toml
//! [[fragment]]
//! template = "methylammonium"
//! name = "lys"
//!
//! [[fragment]]
//! name = "formate"
//! charge = -1
//! offset = [0.0, 0.0, 3.5]
//! atoms = [
//!     { element = "C", position = [0.0, 0.0, 0.0] },
//!     { element = "O", position = [0.63, 1.09, 0.0] },
//!     { element = "O", position = [0.63, -1.09, 0.0] },
//!     { element = "H", position = [-1.1, 0.0, 0.0] },
//! ]
//! bonds = [
//!     { atoms = [0, 1], order = 1.5 },
//!     { atoms = [0, 2], order = "resonance" },
//!     { atoms = [0, 3] },
//! ]
//!
//! [complex]
//! name = "lys-formate"
//! charge = 0
//! multiplicity = 1
//!
//! [energies]
//! lys = -95.7412
//! formate = -187.2951
//! lys-formate = -283.0712
//! ```

use crate::core::composition::ComplexSpec;
use crate::core::fragments::{FragmentTemplate, ParseFragmentTemplateError};
use crate::core::models::atom::Atom;
use crate::core::models::molecule::{Molecule, MoleculeError};
use crate::core::models::topology::{Bond, BondOrder, ParseBondOrderError};
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SystemFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Fragment #{index} has no name and no template to name it after")]
    MissingName { index: usize },
    #[error("Fragment '{fragment}' sets both a template and explicit {field}")]
    ConflictingDefinition {
        fragment: String,
        field: &'static str,
    },
    #[error("Fragment '{fragment}': {source}")]
    Template {
        fragment: String,
        source: ParseFragmentTemplateError,
    },
    #[error("Fragment '{fragment}': {source}")]
    BondOrder {
        fragment: String,
        source: ParseBondOrderError,
    },
    #[error("Molecule '{molecule}' is invalid: {source}")]
    Molecule {
        molecule: String,
        source: MoleculeError,
    },
    #[error("Molecule name '{0}' is used more than once")]
    DuplicateName(String),
    #[error("A system file must define at least one fragment")]
    NoFragments,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawAtom {
    element: String,
    position: [f64; 3],
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawBondOrder {
    Numeric(f64),
    Named(String),
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawBond {
    atoms: [usize; 2],
    order: Option<RawBondOrder>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawFragment {
    name: Option<String>,
    template: Option<String>,
    charge: Option<i32>,
    multiplicity: Option<u32>,
    atoms: Option<Vec<RawAtom>>,
    bonds: Option<Vec<RawBond>>,
    offset: Option<[f64; 3]>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawComplex {
    name: String,
    charge: i32,
    multiplicity: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawSystemFile {
    #[serde(rename = "fragment", default)]
    fragments: Vec<RawFragment>,
    complex: RawComplex,
    #[serde(default)]
    energies: BTreeMap<String, f64>,
}

/// A parsed system file: fragments ready for composition, the complex identity, and any
/// recorded energies (Hartree) keyed by molecule name.
#[derive(Debug, Clone)]
pub struct SystemFile {
    pub fragments: Vec<Molecule>,
    pub complex: ComplexSpec,
    pub energies: BTreeMap<String, f64>,
}

impl SystemFile {
    pub fn load(path: &Path) -> Result<Self, SystemFileError> {
        debug!("Loading system file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| SystemFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SystemFileError> {
        let raw: RawSystemFile = toml::from_str(content)?;
        if raw.fragments.is_empty() {
            return Err(SystemFileError::NoFragments);
        }

        let fragments = raw
            .fragments
            .into_iter()
            .enumerate()
            .map(|(index, fragment)| build_fragment(index, fragment))
            .collect::<Result<Vec<_>, _>>()?;

        let complex = ComplexSpec::new(
            &raw.complex.name,
            raw.complex.charge,
            raw.complex.multiplicity.unwrap_or(1),
        );

        let mut seen = HashSet::new();
        for name in fragments
            .iter()
            .map(Molecule::name)
            .chain(std::iter::once(complex.name.as_str()))
        {
            if !seen.insert(name) {
                return Err(SystemFileError::DuplicateName(name.to_string()));
            }
        }

        Ok(Self {
            fragments,
            complex,
            energies: raw.energies,
        })
    }
}

fn build_fragment(index: usize, raw: RawFragment) -> Result<Molecule, SystemFileError> {
    let molecule = match &raw.template {
        Some(template_name) => {
            let label = raw.name.clone().unwrap_or_else(|| template_name.clone());
            for (field, present) in [
                ("atoms", raw.atoms.is_some()),
                ("bonds", raw.bonds.is_some()),
                ("charge", raw.charge.is_some()),
                ("multiplicity", raw.multiplicity.is_some()),
            ] {
                if present {
                    return Err(SystemFileError::ConflictingDefinition {
                        fragment: label,
                        field,
                    });
                }
            }
            let template: FragmentTemplate =
                template_name
                    .parse()
                    .map_err(|e| SystemFileError::Template {
                        fragment: label.clone(),
                        source: e,
                    })?;
            template.build().renamed(label)
        }
        None => {
            let name = raw
                .name
                .clone()
                .ok_or(SystemFileError::MissingName { index })?;
            let atoms = raw
                .atoms
                .unwrap_or_default()
                .into_iter()
                .map(|a| {
                    let [x, y, z] = a.position;
                    Atom::new(&a.element, Point3::new(x, y, z))
                })
                .collect();
            let bonds = raw
                .bonds
                .unwrap_or_default()
                .into_iter()
                .map(|b| {
                    let order = match b.order {
                        None => Ok(BondOrder::Single),
                        Some(RawBondOrder::Numeric(v)) => BondOrder::try_from(v),
                        Some(RawBondOrder::Named(s)) => s.parse(),
                    }
                    .map_err(|e| SystemFileError::BondOrder {
                        fragment: name.clone(),
                        source: e,
                    })?;
                    Ok(Bond::new(b.atoms[0], b.atoms[1], order))
                })
                .collect::<Result<Vec<_>, SystemFileError>>()?;
            Molecule::new(
                name.clone(),
                atoms,
                bonds,
                raw.charge.unwrap_or(0),
                raw.multiplicity.unwrap_or(1),
            )
            .map_err(|e| SystemFileError::Molecule {
                molecule: name,
                source: e,
            })?
        }
    };

    Ok(match raw.offset {
        Some([x, y, z]) => molecule.translated(&Vector3::new(x, y, z)),
        None => molecule,
    })
}

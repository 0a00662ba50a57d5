use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseContactFieldError {
    #[error("Invalid CDR region: '{0}' (expected CDR1, CDR2, or CDR3)")]
    Region(String),
    #[error("Invalid interaction type: '{0}'")]
    Interaction(String),
}

/// The complementarity-determining region of the antibody a contact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum CdrRegion {
    Cdr1,
    Cdr2,
    Cdr3,
}

impl FromStr for CdrRegion {
    type Err = ParseContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cdr1" | "1" => Ok(Self::Cdr1),
            "cdr2" | "2" => Ok(Self::Cdr2),
            "cdr3" | "3" => Ok(Self::Cdr3),
            _ => Err(ParseContactFieldError::Region(s.to_string())),
        }
    }
}

impl TryFrom<String> for CdrRegion {
    type Error = ParseContactFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CdrRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cdr1 => "CDR1",
            Self::Cdr2 => "CDR2",
            Self::Cdr3 => "CDR3",
        })
    }
}

/// The category of a non-covalent interface interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum InteractionType {
    SaltBridge,
    HydrogenBond,
    CationPi,
    Hydrophobic,
}

impl InteractionType {
    /// Returns the display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SaltBridge => "Salt bridge",
            Self::HydrogenBond => "Hydrogen bond",
            Self::CationPi => "Cation-π",
            Self::Hydrophobic => "Hydrophobic",
        }
    }
}

impl FromStr for InteractionType {
    type Err = ParseContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match key.as_str() {
            "saltbridge" => Ok(Self::SaltBridge),
            "hydrogenbond" | "hbond" => Ok(Self::HydrogenBond),
            "cationpi" => Ok(Self::CationPi),
            "hydrophobic" => Ok(Self::Hydrophobic),
            _ => Err(ParseContactFieldError::Interaction(s.to_string())),
        }
    }
}

impl TryFrom<String> for InteractionType {
    type Error = ParseContactFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single residue-pair contact at an antibody/antigen interface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterfaceContact {
    /// The antibody residue, e.g. "H:ARG100".
    #[serde(rename = "antibody")]
    pub antibody_residue: String,
    /// The antigen residue, e.g. "A:ASP42".
    #[serde(rename = "antigen")]
    pub antigen_residue: String,
    pub region: CdrRegion,
    pub interaction: InteractionType,
    /// Contact distance in Angstroms.
    pub distance: f64,
}

impl InterfaceContact {
    pub fn new(
        antibody_residue: &str,
        antigen_residue: &str,
        region: CdrRegion,
        interaction: InteractionType,
        distance: f64,
    ) -> Self {
        Self {
            antibody_residue: antibody_residue.to_string(),
            antigen_residue: antigen_residue.to_string(),
            region,
            interaction,
            distance,
        }
    }
}

impl fmt::Display for InterfaceContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} [{}] {} ({:.2} Å)",
            self.antibody_residue,
            self.antigen_residue,
            self.region,
            self.interaction.label(),
            self.distance
        )
    }
}

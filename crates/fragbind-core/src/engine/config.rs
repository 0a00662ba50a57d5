use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

/// The family of ground-state solver the external capability should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimationMethod {
    /// Iterative variational search (e.g. VQE).
    Variational,
    /// Perturbative correction on top of a mean-field reference (e.g. MP2).
    Perturbative,
    /// Exact diagonalization of the Hamiltonian in the chosen basis (e.g. FCI).
    ExactDiagonalization,
}

impl FromStr for EstimationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "variational" | "vqe" => Ok(Self::Variational),
            "perturbative" | "mp2" => Ok(Self::Perturbative),
            "exact-diagonalization" | "exact" | "fci" => Ok(Self::ExactDiagonalization),
            _ => Err(ConfigError::UnknownVariant {
                kind: "estimation method",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Variational => "variational",
            Self::Perturbative => "perturbative",
            Self::ExactDiagonalization => "exact-diagonalization",
        })
    }
}

/// Noise-mitigation policy requested from hardware-backed solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorMitigation {
    ZeroNoiseExtrapolation,
    ReadoutCorrection,
    SymmetryVerification,
}

impl FromStr for ErrorMitigation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero-noise-extrapolation" | "zne" => Ok(Self::ZeroNoiseExtrapolation),
            "readout-correction" | "readout" => Ok(Self::ReadoutCorrection),
            "symmetry-verification" | "symmetry" => Ok(Self::SymmetryVerification),
            _ => Err(ConfigError::UnknownVariant {
                kind: "error mitigation policy",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ErrorMitigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroNoiseExtrapolation => "zero-noise-extrapolation",
            Self::ReadoutCorrection => "readout-correction",
            Self::SymmetryVerification => "symmetry-verification",
        })
    }
}

/// Parameters for a single ground-state energy estimation.
///
/// A configuration is a plain value handed to every estimation call; nothing is read from
/// process-wide state, so concurrent estimations with different settings never interfere.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationConfig {
    pub method: EstimationMethod,
    /// Name of the execution backend the solver should use, if it supports several.
    pub backend: Option<String>,
    /// Upper bound on the solver's own convergence loop.
    pub max_iterations: usize,
    /// Energy convergence threshold in Hartree.
    pub tolerance: f64,
    /// Starting point for variational parameters.
    pub initial_parameters: Option<Vec<f64>>,
    pub error_mitigation: Option<ErrorMitigation>,
    /// Overrides the source of one- and two-electron integrals (e.g. a basis set or driver name).
    pub integral_provider: Option<String>,
}

impl EstimationConfig {
    /// Checks the numeric invariants: a positive iteration cap, a positive finite
    /// tolerance, and finite initial parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be a positive finite number, got {}", self.tolerance),
            });
        }
        if let Some(params) = &self.initial_parameters {
            if params.iter().any(|p| !p.is_finite()) {
                return Err(ConfigError::InvalidParameter {
                    name: "initial_parameters",
                    reason: "all parameters must be finite".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct EstimationConfigBuilder {
    method: Option<EstimationMethod>,
    backend: Option<String>,
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    initial_parameters: Option<Vec<f64>>,
    error_mitigation: Option<ErrorMitigation>,
    integral_provider: Option<String>,
}

impl EstimationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: EstimationMethod) -> Self {
        self.method = Some(method);
        self
    }
    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn initial_parameters(mut self, parameters: Vec<f64>) -> Self {
        self.initial_parameters = Some(parameters);
        self
    }
    pub fn error_mitigation(mut self, policy: ErrorMitigation) -> Self {
        self.error_mitigation = Some(policy);
        self
    }
    pub fn integral_provider(mut self, provider: impl Into<String>) -> Self {
        self.integral_provider = Some(provider.into());
        self
    }

    pub fn build(self) -> Result<EstimationConfig, ConfigError> {
        let config = EstimationConfig {
            method: self.method.ok_or(ConfigError::MissingParameter("method"))?,
            backend: self.backend,
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
            tolerance: self
                .tolerance
                .ok_or(ConfigError::MissingParameter("tolerance"))?,
            initial_parameters: self.initial_parameters,
            error_mitigation: self.error_mitigation,
            integral_provider: self.integral_provider,
        };
        config.validate()?;
        Ok(config)
    }
}

mod defaults;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use fragbind::engine::config::{
    ErrorMitigation, EstimationConfig, EstimationConfigBuilder, EstimationMethod,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEstimationConfig {
    method: Option<String>,
    backend: Option<String>,
    #[serde(rename = "max-iterations")]
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    #[serde(rename = "initial-parameters")]
    initial_parameters: Option<Vec<f64>>,
    #[serde(rename = "error-mitigation")]
    error_mitigation: Option<String>,
    #[serde(rename = "integral-provider")]
    integral_provider: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSolverConfig {
    command: Option<PathBuf>,
    args: Option<Vec<String>>,
}

/// The `run` configuration file, with every field optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    estimation: Option<PartialEstimationConfig>,
    solver: Option<PartialSolverConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub command: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub estimation: EstimationConfig,
    /// External solver to run; `None` means energies come from the system file.
    pub solver: Option<SolverConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final configuration. Precedence, highest first: dedicated CLI flags,
    /// `--set` values, the configuration file, built-in defaults.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<RunConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let file_estimation = self.estimation.take().unwrap_or_default();
        let file_solver = self.solver.take().unwrap_or_default();

        let method = match args.method.as_ref().or(file_estimation.method.as_ref()) {
            Some(name) => parse_value::<EstimationMethod>(name)?,
            None => defaults.method,
        };

        let mut builder = EstimationConfigBuilder::new()
            .method(method)
            .max_iterations(
                args.max_iterations
                    .or(file_estimation.max_iterations)
                    .unwrap_or(defaults.max_iterations),
            )
            .tolerance(
                args.tolerance
                    .or(file_estimation.tolerance)
                    .unwrap_or(defaults.tolerance),
            );

        if let Some(backend) = args.backend.as_ref().or(file_estimation.backend.as_ref()) {
            builder = builder.backend(backend.as_str());
        }
        if let Some(parameters) = file_estimation.initial_parameters {
            builder = builder.initial_parameters(parameters);
        }
        if let Some(policy) = &file_estimation.error_mitigation {
            builder = builder.error_mitigation(parse_value::<ErrorMitigation>(policy)?);
        }
        if let Some(provider) = file_estimation.integral_provider {
            builder = builder.integral_provider(provider);
        }

        let estimation = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let solver = args
            .solver_command
            .clone()
            .or(file_solver.command)
            .map(|command| SolverConfig {
                command,
                args: if args.solver_args.is_empty() {
                    file_solver.args.unwrap_or_default()
                } else {
                    args.solver_args.clone()
                },
            });

        Ok(RunConfig { estimation, solver })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            let estimation = self.estimation.get_or_insert_with(Default::default);
            match key {
                "estimation.method" => estimation.method = Some(value_str.to_string()),
                "estimation.backend" => estimation.backend = Some(value_str.to_string()),
                "estimation.max-iterations" => {
                    estimation.max_iterations = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "estimation.tolerance" => {
                    estimation.tolerance = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "estimation.error-mitigation" => {
                    estimation.error_mitigation = Some(value_str.to_string());
                }
                "estimation.integral-provider" => {
                    estimation.integral_provider = Some(value_str.to_string());
                }
                "solver.command" => {
                    self.solver.get_or_insert_with(Default::default).command =
                        Some(PathBuf::from(value_str));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| CliError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("config.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["fragbind", "run", "-i", "system.toml"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[test]
    fn empty_config_resolves_to_defaults() {
        let config = PartialRunConfig::default()
            .merge_with_cli(&run_args(&[]))
            .unwrap();

        assert_eq!(config.estimation.method, EstimationMethod::Variational);
        assert_eq!(config.estimation.max_iterations, 100);
        assert_eq!(config.estimation.tolerance, 1e-6);
        assert_eq!(config.estimation.backend, None);
        assert_eq!(config.solver, None);
    }

    #[test]
    fn file_values_are_loaded_and_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [estimation]
            method = "exact-diagonalization"
            backend = "statevector"
            max-iterations = 500
            tolerance = 1e-8
            initial-parameters = [0.1, -0.2]
            error-mitigation = "readout-correction"
            integral-provider = "sto-3g"

            [solver]
            command = "/opt/solver/bin/estimate"
            args = ["--quiet"]
            "#,
        );

        let config = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&run_args(&[]))
            .unwrap();

        assert_eq!(
            config.estimation.method,
            EstimationMethod::ExactDiagonalization
        );
        assert_eq!(config.estimation.backend.as_deref(), Some("statevector"));
        assert_eq!(config.estimation.max_iterations, 500);
        assert_eq!(config.estimation.tolerance, 1e-8);
        assert_eq!(config.estimation.initial_parameters, Some(vec![0.1, -0.2]));
        assert_eq!(
            config.estimation.error_mitigation,
            Some(ErrorMitigation::ReadoutCorrection)
        );
        assert_eq!(config.estimation.integral_provider.as_deref(), Some("sto-3g"));
        assert_eq!(
            config.solver,
            Some(SolverConfig {
                command: PathBuf::from("/opt/solver/bin/estimate"),
                args: vec!["--quiet".to_string()],
            })
        );
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [estimation]
            method = "variational"
            max-iterations = 500
            tolerance = 1e-8

            [solver]
            command = "/opt/solver/bin/estimate"
            args = ["--quiet"]
            "#,
        );

        let args = run_args(&[
            "--method",
            "mp2",
            "--max-iterations",
            "20",
            "--solver-command",
            "./other-solver",
            "--solver-arg",
            "--verbose",
        ]);
        let config = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.estimation.method, EstimationMethod::Perturbative);
        assert_eq!(config.estimation.max_iterations, 20);
        assert_eq!(config.estimation.tolerance, 1e-8);
        assert_eq!(
            config.solver,
            Some(SolverConfig {
                command: PathBuf::from("./other-solver"),
                args: vec!["--verbose".to_string()],
            })
        );
    }

    #[test]
    fn set_values_override_file_but_not_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [estimation]
            tolerance = 1e-8
            max-iterations = 500
            "#,
        );

        let args = run_args(&[
            "-S",
            "estimation.tolerance=1e-4",
            "-S",
            "estimation.max-iterations=7",
            "--max-iterations",
            "9",
        ]);
        let config = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.estimation.tolerance, 1e-4);
        assert_eq!(config.estimation.max_iterations, 9);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[estimation]\nshots = 1000\n");

        let result = PartialRunConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn invalid_values_are_reported_as_config_errors() {
        let bad_method = PartialRunConfig::default().merge_with_cli(&run_args(&["-m", "dft"]));
        assert!(matches!(bad_method, Err(CliError::Config(_))));

        let bad_tolerance = PartialRunConfig::default()
            .merge_with_cli(&run_args(&["-S", "estimation.tolerance=-1"]));
        assert!(matches!(bad_tolerance, Err(CliError::Config(_))));

        let bad_key = PartialRunConfig::default()
            .merge_with_cli(&run_args(&["-S", "estimation.shots=10"]));
        assert!(matches!(bad_key, Err(CliError::Config(_))));

        let bad_format =
            PartialRunConfig::default().merge_with_cli(&run_args(&["-S", "estimation.method"]));
        assert!(matches!(bad_format, Err(CliError::Config(_))));
    }
}

use crate::core::io::xyz;
use crate::core::models::molecule::Molecule;
use crate::engine::config::EstimationConfig;
use crate::engine::estimator::{EnergyEstimator, EnergyResult};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};

/// Runs an external solver program once per molecule.
///
/// The program receives the molecule in XYZ format on stdin and the estimation settings as
/// command-line flags appended after any fixed arguments:
///
/// ```text
/// <program> <args...> --method <m> --max-iterations <n> --tolerance <t>
///           --charge <q> --multiplicity <2S+1>
///           [--backend <b>] [--error-mitigation <p>] [--integral-provider <i>]
///           [--initial-parameters <p1,p2,...>]
/// ```
///
/// The last non-empty line of stdout must be the ground-state energy in Hartree. A spawn
/// error, a non-zero exit status, or an unparsable energy line yields a failure carrying
/// the reason (and the program's stderr when available).
#[derive(Debug, Clone)]
pub struct CommandEstimator {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEstimator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Builds the flag list passed to the solver for `molecule` under `config`.
    pub fn solver_flags(molecule: &Molecule, config: &EstimationConfig) -> Vec<String> {
        let mut flags = vec![
            "--method".to_string(),
            config.method.to_string(),
            "--max-iterations".to_string(),
            config.max_iterations.to_string(),
            "--tolerance".to_string(),
            format!("{:e}", config.tolerance),
            "--charge".to_string(),
            molecule.charge().to_string(),
            "--multiplicity".to_string(),
            molecule.multiplicity().to_string(),
        ];
        if let Some(backend) = &config.backend {
            flags.extend(["--backend".to_string(), backend.clone()]);
        }
        if let Some(policy) = config.error_mitigation {
            flags.extend(["--error-mitigation".to_string(), policy.to_string()]);
        }
        if let Some(provider) = &config.integral_provider {
            flags.extend(["--integral-provider".to_string(), provider.clone()]);
        }
        if let Some(params) = &config.initial_parameters {
            let joined = params
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            flags.extend(["--initial-parameters".to_string(), joined]);
        }
        flags
    }

    fn run(&self, molecule: &Molecule, config: &EstimationConfig) -> Result<f64, String> {
        let flags = Self::solver_flags(molecule, config);
        debug!(program = ?self.program, ?flags, "Spawning solver process.");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(&flags)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start solver {:?}: {}", self.program, e))?;

        // stdin is written while stdout and stderr are being drained.
        let stdin = child.stdin.take();
        let output = thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    // A solver that exits without reading its input is judged by its exit status.
                    if let Err(e) = xyz::write_xyz(molecule, &mut stdin) {
                        trace!("Solver closed stdin early: {}", e);
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| format!("failed to wait for solver: {}", e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(format!(
                "solver exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let last_line = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| "solver produced no output".to_string())?;
        last_line
            .parse::<f64>()
            .map_err(|_| format!("could not parse energy from solver output: '{}'", last_line))
    }
}

impl EnergyEstimator for CommandEstimator {
    fn name(&self) -> &str {
        "command"
    }

    fn estimate(&self, molecule: &Molecule, config: &EstimationConfig) -> EnergyResult {
        match self.run(molecule, config) {
            Ok(energy) => EnergyResult::success(energy),
            Err(message) => EnergyResult::failure(message),
        }
    }
}

use crate::cli::RunArgs;
use crate::config::{PartialRunConfig, RunConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use fragbind::{
    core::io::{system::SystemFile, xyz},
    engine::{
        estimator::EnergyEstimator,
        estimators::{CommandEstimator, RecordedEstimator},
        progress::ProgressReporter,
    },
    workflows::{self, binding::BindingReport},
};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{info, warn};

pub async fn run(args: RunArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let run_config = partial_config.merge_with_cli(&args)?;

    info!("Loading system from {:?}", &args.input);
    let system = SystemFile::load(&args.input)?;
    let estimator = build_estimator(&run_config, &system)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Estimating {} fragment(s) and complex '{}' with the {} method...",
        system.fragments.len(),
        system.complex.name,
        run_config.estimation.method
    );
    info!("Invoking the binding workflow...");

    let outcome = tokio::task::block_in_place(|| {
        workflows::binding::run(
            &system.fragments,
            &system.complex,
            estimator.as_ref(),
            &run_config.estimation,
            &reporter,
        )
    });

    let failed = progress_handler.failed_molecules();
    if !failed.is_empty() {
        warn!("Estimation failed for: {}", failed.join(", "));
    }
    let report = outcome?;

    if let Some(output) = &args.output {
        info!("Writing composed complex to {:?}", output);
        let mut writer = BufWriter::new(File::create(output)?);
        xyz::write_xyz(&report.complex, &mut writer)?;
        writer.flush()?;
    }

    print!("{}", format_report(&report));
    Ok(())
}

fn build_estimator(
    config: &RunConfig,
    system: &SystemFile,
) -> Result<Box<dyn EnergyEstimator>> {
    if let Some(solver) = &config.solver {
        info!(
            "Using external solver {:?} with {} fixed argument(s).",
            solver.command,
            solver.args.len()
        );
        return Ok(Box::new(
            CommandEstimator::new(solver.command.clone()).with_args(solver.args.iter().cloned()),
        ));
    }

    if system.energies.is_empty() {
        return Err(CliError::Argument(
            "No energy source. Pass --solver-command, set [solver] in the config file, \
             or add an [energies] table to the system file."
                .to_string(),
        ));
    }

    info!(
        "Using {} recorded energies from the system file.",
        system.energies.len()
    );
    Ok(Box::new(
        system
            .energies
            .iter()
            .map(|(name, energy)| (name.as_str(), *energy))
            .collect::<RecordedEstimator>(),
    ))
}

fn format_report(report: &BindingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ground-state energies (Hartree):");
    for fragment in &report.fragment_energies {
        let _ = writeln!(out, "  {:<24} {:>16.6}", fragment.molecule, fragment.energy);
    }
    let _ = writeln!(
        out,
        "  {:<24} {:>16.6}",
        format!("{} (complex)", report.complex_energy.molecule),
        report.complex_energy.energy
    );
    let _ = writeln!(
        out,
        "Binding energy: {:.6} Ha = {:.3} kcal/mol ({})",
        report.binding.hartree, report.binding.kcal_per_mol, report.binding.strength
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    const SYSTEM: &str = r#"
[[fragment]]
template = "methylammonium"
name = "lys"

[[fragment]]
template = "acetate"
name = "asp"
offset = [4.0, 0.0, 0.0]

[complex]
name = "lys-asp"
charge = 0

[energies]
lys = -95.7412
asp = -227.8195
lys-asp = -323.6307
"#;

    fn run_args(input: &Path, extra: &[&str]) -> RunArgs {
        let input = input.to_str().unwrap();
        let mut argv = vec!["fragbind", "run", "-i", input];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_with_recorded_energies_writes_complex() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("system.toml");
        let output = dir.path().join("complex.xyz");
        fs::write(&input, SYSTEM).unwrap();

        run(run_args(&input, &["-o", output.to_str().unwrap()]))
            .await
            .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("15\nlys-asp charge=0 multiplicity=1\n"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_recorded_energy_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("system.toml");
        fs::write(&input, SYSTEM.replace("asp = -227.8195\n", "")).unwrap();

        let result = run(run_args(&input, &[])).await;

        assert!(matches!(
            result,
            Err(CliError::Engine(
                fragbind::engine::error::EngineError::EstimationFailure { ref molecule, .. }
            )) if molecule == "asp"
        ));
    }

    #[test]
    fn system_without_energies_needs_a_solver() {
        let system = SystemFile::from_toml_str(
            "[[fragment]]\ntemplate = \"acetate\"\n\n[complex]\nname = \"alone\"\ncharge = -1\n",
        )
        .unwrap();
        let config = PartialRunConfig::default()
            .merge_with_cli(&run_args(Path::new("system.toml"), &[]))
            .unwrap();

        assert!(matches!(
            build_estimator(&config, &system),
            Err(CliError::Argument(_))
        ));

        let config = PartialRunConfig::default()
            .merge_with_cli(&run_args(
                Path::new("system.toml"),
                &["--solver-command", "/opt/solver"],
            ))
            .unwrap();
        let estimator = build_estimator(&config, &system).unwrap();
        assert_eq!(estimator.name(), "command");
    }

    #[test]
    fn report_lists_energies_and_classification() {
        let system = SystemFile::from_toml_str(SYSTEM).unwrap();
        let estimator: RecordedEstimator = system
            .energies
            .iter()
            .map(|(name, energy)| (name.as_str(), *energy))
            .collect();
        let config = PartialRunConfig::default()
            .merge_with_cli(&run_args(Path::new("system.toml"), &[]))
            .unwrap();

        let report = workflows::binding::run(
            &system.fragments,
            &system.complex,
            &estimator,
            &config.estimation,
            &ProgressReporter::new(),
        )
        .unwrap();
        let text = format_report(&report);

        assert!(text.contains("lys"));
        assert!(text.contains("lys-asp (complex)"));
        assert!(text.contains("-323.630700"));
        assert!(text.contains("Binding energy: -0.070000 Ha = -43.925 kcal/mol (Strong)"));
    }
}

use fragbind::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders workflow progress events as an indicatif spinner or bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: Arc<Mutex<ProgressBar>>,
    failures: Arc<Mutex<Vec<String>>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.finish_and_clear();

        Self {
            bar: Arc::new(Mutex::new(bar)),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Names of the molecules whose estimation failed so far.
    pub fn failed_molecules(&self) -> Vec<String> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = Arc::clone(&self.bar);
        let failures = Arc::clone(&self.failures);

        Box::new(move |progress: Progress| {
            let Ok(bar) = bar.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    bar.reset();
                    bar.set_length(0);
                    bar.set_style(Self::spinner_style());
                    bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    bar.set_message(name);
                }
                Progress::PhaseFinish => {
                    bar.disable_steady_tick();
                    bar.finish_with_message("✓ Done");
                }
                Progress::TaskStart { total_steps } => {
                    bar.disable_steady_tick();
                    bar.reset();
                    bar.set_length(total_steps);
                    bar.set_position(0);
                    bar.set_style(Self::bar_style());
                }
                Progress::TaskIncrement => bar.inc(1),
                Progress::TaskFinish => {
                    let total = bar.length().unwrap_or(0);
                    if bar.position() < total {
                        bar.set_position(total);
                    }
                    bar.finish();
                }
                Progress::EstimationFinished { molecule, success } => {
                    if success {
                        bar.set_message(molecule);
                    } else {
                        bar.println(format!("  ✗ Estimation failed for '{}'", molecule));
                        if let Ok(mut failures) = failures.lock() {
                            failures.push(molecule);
                        }
                    }
                }
                Progress::Message(msg) => {
                    if bar.is_finished() {
                        bar.set_message(msg);
                    } else {
                        bar.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

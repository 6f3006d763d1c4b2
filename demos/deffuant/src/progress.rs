//! `indicatif` progress bar driven by simulator callbacks.

use df_sim::{SimObserver, StepStats};
use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} steps {msg} (ETA: {eta})";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Advances a bar once per recorded step and grows it when the convergence
/// loop adds rounds.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet { ProgressBar::hidden() } else { ProgressBar::new(0) };
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            bar.set_style(style.progress_chars(PROGRESS_CHARS));
        }
        Self { bar }
    }
}

impl SimObserver for ProgressObserver {
    fn on_run_start(&mut self, steps: usize) {
        self.bar.set_length(steps.saturating_sub(1) as u64);
    }

    fn on_step_end(&mut self, _step: usize, _stats: &StepStats) {
        self.bar.inc(1);
    }

    fn on_extend(&mut self, extra_steps: usize) {
        self.bar.inc_length(extra_steps as u64);
        self.bar.set_message("(converging)");
    }

    fn on_convergence_check(&mut self, check: usize, converged: bool) {
        if converged {
            self.bar.set_message(format!("converged after {check} extra rounds"));
        }
    }

    fn on_run_end(&mut self, _len: usize) {
        self.bar.finish();
    }
}

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use syfos::engine::progress::{Progress, ProgressCallback};
use tracing::{debug, warn};

const SPINNER_TICK_MS: u64 = 80;

struct ProgressState {
    bar: ProgressBar,
    /// Name of the running phase; labels the replica bar and the completion line.
    phase: &'static str,
}

/// Renders synthesis progress: a spinner while a phase runs, a bar over the replicas,
/// and a `✓ <phase>` line when a phase completes.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<ProgressState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Tracks progress without drawing anything, for `--quiet` runs.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(ProgressState { bar, phase: "" })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let handler = self.clone();
        Box::new(move |progress: Progress| handler.handle(progress))
    }

    fn handle(&self, progress: Progress) {
        let Ok(mut state) = self.state.lock() else {
            warn!("Progress state mutex was poisoned. Cannot update progress.");
            return;
        };

        match progress {
            Progress::PhaseStart { name } => {
                state.phase = name;
                let bar = &state.bar;
                bar.reset();
                bar.set_length(0);
                bar.set_style(Self::spinner_style());
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                bar.set_message(name);
            }
            Progress::PhaseFinish => {
                state.bar.disable_steady_tick();
                state.bar.finish_with_message(format!("✓ {}", state.phase));
            }
            Progress::TaskStart { total_steps } => {
                let bar = &state.bar;
                bar.disable_steady_tick();
                bar.reset();
                bar.set_length(total_steps);
                bar.set_position(0);
                bar.set_style(Self::bar_style());
                bar.set_message(state.phase);
            }
            Progress::TaskIncrement => state.bar.inc(1),
            Progress::TaskFinish => {
                let length = state.bar.length().unwrap_or(0);
                state.bar.set_position(length);
            }
            Progress::Message(msg) => {
                debug!(phase = state.phase, "{}", msg);
                state.bar.println(format!("  {}", msg));
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} replicas ({elapsed_precise})",
        )
        .expect("Failed to create bar style template")
        .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn snapshot(handler: &CliProgressHandler) -> (String, Option<u64>, u64, bool) {
        let state = handler.state.lock().unwrap();
        (
            state.bar.message(),
            state.bar.length(),
            state.bar.position(),
            state.bar.is_finished(),
        )
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::hidden();
        let (_, length, position, finished) = snapshot(&handler);
        assert_eq!(length, Some(0));
        assert_eq!(position, 0);
        assert!(finished);
    }

    #[test]
    fn synthesis_events_drive_spinner_then_bar() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Ideal Curve",
        });
        assert_eq!(snapshot(&handler).0, "Ideal Curve");
        assert!(!snapshot(&handler).3);

        callback(Progress::PhaseFinish);
        assert_eq!(snapshot(&handler).0, "✓ Ideal Curve");
        assert!(snapshot(&handler).3);

        callback(Progress::PhaseStart { name: "Replicas" });
        callback(Progress::TaskStart { total_steps: 10 });
        let (message, length, position, _) = snapshot(&handler);
        assert_eq!(message, "Replicas");
        assert_eq!(length, Some(10));
        assert_eq!(position, 0);

        for _ in 0..3 {
            callback(Progress::TaskIncrement);
        }
        assert_eq!(snapshot(&handler).2, 3);

        callback(Progress::TaskFinish);
        assert_eq!(snapshot(&handler).2, 10);

        callback(Progress::PhaseFinish);
        assert_eq!(snapshot(&handler).0, "✓ Replicas");
    }

    #[test]
    fn messages_leave_the_phase_label_untouched() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Replicas" });
        callback(Progress::Message("Drew random seed 7".to_string()));
        callback(Progress::PhaseFinish);

        assert_eq!(snapshot(&handler).0, "✓ Replicas");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::scope(|scope| {
            scope.spawn(|| {
                callback(Progress::PhaseStart { name: "Replicas" });
                callback(Progress::TaskStart { total_steps: 8 });
            });
        });
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| callback(Progress::TaskIncrement));
            }
        });

        assert_eq!(snapshot(&handler).2, 8);
    }
}

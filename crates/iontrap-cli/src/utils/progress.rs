use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use iontrap::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 100;

/// Bar plus the running tallies of the sweep it is showing.
struct SweepDisplay {
    bar: ProgressBar,
    phase: &'static str,
    candidates: u64,
    notices: Vec<String>,
}

impl SweepDisplay {
    fn label(&self) -> String {
        format!("{}: {} candidates", self.phase, self.candidates)
    }

    fn handle(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.candidates = 0;
                self.bar.reset();
                self.bar.set_style(spinner_style());
                self.bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                self.bar.set_message(name);
            }
            Progress::SweepStart { total_points } => {
                self.candidates = 0;
                self.bar.disable_steady_tick();
                self.bar.reset();
                self.bar.set_length(total_points);
                self.bar.set_style(grid_style());
                self.bar.set_message(self.label());
            }
            Progress::PointEvaluated { candidates } => {
                self.candidates += candidates;
                self.bar.inc(1);
                self.bar.set_message(self.label());
            }
            Progress::SweepFinish => {
                if let Some(total) = self.bar.length() {
                    self.bar.set_position(total);
                }
                self.bar.set_message(self.label());
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                self.bar
                    .finish_with_message(format!("✓ {}", self.label()));
                for notice in self.notices.drain(..) {
                    self.bar.println(format!("  ⚠ {notice}"));
                }
            }
            Progress::Message(msg) => self.notices.push(msg),
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn grid_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {bar:36.cyan/blue} {pos}/{len} geometries  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Terminal progress for sweeps: one bar per phase, advanced per grid point,
/// with the number of evaluated candidates in the message.
///
/// Notices sent during a phase are held back and printed once it finishes so
/// they do not interleave with the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<SweepDisplay>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.finish_and_clear();
        Self {
            display: Arc::new(Mutex::new(SweepDisplay {
                bar,
                phase: "",
                candidates: 0,
                notices: Vec::new(),
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();
        Box::new(move |event: Progress| match display.lock() {
            Ok(mut display) => display.handle(event),
            Err(_) => warn!("Progress display mutex was poisoned; dropping event."),
        })
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

    #[test]
    fn candidate_tally_follows_evaluated_points() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Full Geometry Sweep",
        });
        callback(Progress::SweepStart { total_points: 600 });
        callback(Progress::PointEvaluated { candidates: 100 });
        callback(Progress::PointEvaluated { candidates: 98 });
        {
            let display = handler.display.lock().unwrap();
            assert_eq!(display.candidates, 198);
            assert_eq!(display.bar.position(), 2);
            assert_eq!(display.bar.length(), Some(600));
            assert_eq!(display.bar.message(), "Full Geometry Sweep: 198 candidates");
        }

        callback(Progress::SweepFinish);
        callback(Progress::PhaseFinish);
        let display = handler.display.lock().unwrap();
        assert_eq!(display.bar.position(), 600);
        assert!(display.bar.is_finished());
        assert_eq!(display.bar.message(), "✓ Full Geometry Sweep: 198 candidates");
    }

    #[test]
    fn new_phase_resets_the_tally() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "First" });
        callback(Progress::SweepStart { total_points: 1 });
        callback(Progress::PointEvaluated { candidates: 40 });
        callback(Progress::PhaseFinish);

        callback(Progress::PhaseStart { name: "Second" });
        let display = handler.display.lock().unwrap();
        assert_eq!(display.candidates, 0);
        assert_eq!(display.phase, "Second");
        assert!(!display.bar.is_finished());
    }

    #[test]
    fn notices_are_flushed_when_the_phase_ends() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Sweep" });
        callback(Progress::Message("near q_max".to_string()));
        assert_eq!(handler.display.lock().unwrap().notices, vec!["near q_max"]);

        callback(Progress::PhaseFinish);
        assert!(handler.display.lock().unwrap().notices.is_empty());
    }

    #[test]
    fn callback_can_be_called_from_worker_threads() {
        let handler = CliProgressHandler::new();
        let callback = Arc::new(handler.get_callback());
        callback(Progress::SweepStart { total_points: 8 });

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let callback = callback.clone();
                scope.spawn(move || callback(Progress::PointEvaluated { candidates: 5 }));
            }
        });

        let display = handler.display.lock().unwrap();
        assert_eq!(display.candidates, 40);
        assert_eq!(display.bar.position(), 8);
    }
}

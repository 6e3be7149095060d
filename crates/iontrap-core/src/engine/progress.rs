/// Events emitted while a sweep or workflow runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A sweep is about to evaluate `total_points` grid points.
    SweepStart { total_points: u64 },
    /// One grid point finished, producing `candidates` records.
    PointEvaluated { candidates: u64 },
    SweepFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` between a `PhaseStart`/`PhaseFinish` pair.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let out = f();
        self.report(Progress::PhaseFinish);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_reporter() -> (ProgressReporter<'static>, Arc<Mutex<Vec<Progress>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            sink.lock().unwrap().push(p);
        }));
        (reporter, events)
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::Message("ignored".to_string()));
        assert_eq!(reporter.phase("noop", || 7), 7);
    }

    #[test]
    fn phase_wraps_closure_in_start_and_finish_events() {
        let (reporter, events) = recording_reporter();
        let value = reporter.phase("Sweep", || {
            reporter.report(Progress::PointEvaluated { candidates: 3 });
            42
        });
        assert_eq!(value, 42);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::PhaseStart { name: "Sweep" },
                Progress::PointEvaluated { candidates: 3 },
                Progress::PhaseFinish,
            ]
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional observer; silent without one.
///
/// The reporter is shared by reference across replica workers, so the callback must
/// tolerate concurrent invocation.
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

    /// Runs `f` between a `PhaseStart` and a `PhaseFinish` event. A failed phase is not
    /// reported as finished.
    pub fn phase<T, E>(
        &self,
        name: &'static str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        let value = f()?;
        self.report(Progress::PhaseFinish);
        Ok(value)
    }

    /// Reports `TaskStart` and returns a guard that reports `TaskFinish` when dropped.
    pub fn start_task(&self, total_steps: u64) -> TaskProgress<'_, 'a> {
        self.report(Progress::TaskStart { total_steps });
        TaskProgress { reporter: self }
    }
}

pub struct TaskProgress<'r, 'a> {
    reporter: &'r ProgressReporter<'a>,
}

impl TaskProgress<'_, '_> {
    #[inline]
    pub fn increment(&self) {
        self.reporter.report(Progress::TaskIncrement);
    }
}

impl Drop for TaskProgress<'_, '_> {
    fn drop(&mut self) {
        self.reporter.report(Progress::TaskFinish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_reporter(events: &Mutex<Vec<Progress>>) -> ProgressReporter<'_> {
        ProgressReporter::with_callback(Box::new(move |event| {
            events.lock().unwrap().push(event);
        }))
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskIncrement);
        let value: Result<u8, ()> = reporter.phase("Replicas", || Ok(3));
        assert_eq!(value, Ok(3));
    }

    #[test]
    fn successful_phase_is_bracketed_by_start_and_finish() {
        let events = Mutex::new(Vec::new());
        let reporter = recording_reporter(&events);

        let result: Result<(), ()> = reporter.phase("Ideal Curve", || {
            reporter.report(Progress::Message("inside".to_string()));
            Ok(())
        });
        drop(reporter);

        assert!(result.is_ok());
        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::PhaseStart {
                    name: "Ideal Curve"
                },
                Progress::Message("inside".to_string()),
                Progress::PhaseFinish,
            ]
        );
    }

    #[test]
    fn failed_phase_is_not_reported_as_finished() {
        let events = Mutex::new(Vec::new());
        let reporter = recording_reporter(&events);

        let result: Result<(), &str> = reporter.phase("Ideal Curve", || Err("exhausted"));
        drop(reporter);

        assert_eq!(result, Err("exhausted"));
        assert_eq!(
            events.into_inner().unwrap(),
            vec![Progress::PhaseStart {
                name: "Ideal Curve"
            }]
        );
    }

    #[test]
    fn task_guard_reports_finish_on_drop() {
        let events = Mutex::new(Vec::new());
        let reporter = recording_reporter(&events);

        {
            let task = reporter.start_task(2);
            task.increment();
            task.increment();
        }
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::TaskStart { total_steps: 2 },
                Progress::TaskIncrement,
                Progress::TaskIncrement,
                Progress::TaskFinish,
            ]
        );
    }
}

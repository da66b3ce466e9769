//! Progress observation for optimization runs.
//!
//! Optimizers have no hard I/O dependency: after each iteration they notify
//! an injected observer instead of printing. Observers cannot stop a run —
//! the only exits are convergence and the iteration budget.

use crate::types::Scalar;

/// Per-iteration information passed to observers.
#[derive(Clone, Debug)]
pub struct IterationInfo<T: Scalar> {
    /// Iteration index, 1-based.
    pub iteration: usize,

    /// Objective value at the just-updated position.
    pub value: T,

    /// One algorithm-specific diagnostic scalar: gradient magnitude for the
    /// plain descent solvers, accepted step size for the line-search solver,
    /// velocity or applied-delta magnitude for the accumulator-based ones.
    pub diagnostic: T,
}

/// Trait for observing optimization progress.
///
/// All hooks have no-op defaults, so an observer only implements what it
/// needs.
pub trait ProgressObserver<T: Scalar> {
    /// Called once before the first iteration.
    fn on_start(&mut self) {}

    /// Called after each iteration's position update.
    fn on_iteration(&mut self, info: &IterationInfo<T>) {
        let _ = info;
    }

    /// Called once after the run terminates.
    fn on_finish(&mut self, iterations: usize, converged: bool) {
        let _ = (iterations, converged);
    }
}

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl<T: Scalar> ProgressObserver<T> for NoOpObserver {}

/// An observer that prints progress to stdout.
#[derive(Debug, Clone)]
pub struct PrintProgress {
    print_every: usize,
}

impl PrintProgress {
    /// Create a new progress printing observer reporting every
    /// `print_every` iterations.
    pub fn new(print_every: usize) -> Self {
        Self {
            print_every: print_every.max(1),
        }
    }
}

impl Default for PrintProgress {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T: Scalar> ProgressObserver<T> for PrintProgress {
    fn on_iteration(&mut self, info: &IterationInfo<T>) {
        if info.iteration % self.print_every == 0 {
            println!(
                "Iter {:3} | f(x) = {:.6} | {:.6}",
                info.iteration,
                info.value.to_f64(),
                info.diagnostic.to_f64()
            );
        }
    }

    fn on_finish(&mut self, iterations: usize, converged: bool) {
        if converged {
            println!("Converged in {iterations} iterations.");
        } else {
            println!("Did not converge within {iterations} iterations.");
        }
    }
}

/// An observer that records every iteration, for tests and analysis.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver<T: Scalar> {
    /// The recorded per-iteration trace.
    pub history: Vec<IterationInfo<T>>,
}

impl<T: Scalar> RecordingObserver<T> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// The diagnostics column of the trace.
    pub fn diagnostics(&self) -> Vec<T> {
        self.history.iter().map(|info| info.diagnostic).collect()
    }

    /// The objective-value column of the trace.
    pub fn values(&self) -> Vec<T> {
        self.history.iter().map(|info| info.value).collect()
    }
}

impl<T: Scalar> ProgressObserver<T> for RecordingObserver<T> {
    fn on_iteration(&mut self, info: &IterationInfo<T>) {
        self.history.push(info.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let mut recorder = RecordingObserver::<f64>::new();
        ProgressObserver::on_start(&mut recorder);
        recorder.on_iteration(&IterationInfo {
            iteration: 1,
            value: 2.0,
            diagnostic: 0.5,
        });
        recorder.on_iteration(&IterationInfo {
            iteration: 2,
            value: 1.0,
            diagnostic: 0.25,
        });
        ProgressObserver::<f64>::on_finish(&mut recorder, 2, true);

        assert_eq!(recorder.history.len(), 2);
        assert_eq!(recorder.values(), vec![2.0, 1.0]);
        assert_eq!(recorder.diagnostics(), vec![0.5, 0.25]);
    }

    #[test]
    fn test_print_progress_interval_floor() {
        let observer = PrintProgress::new(0);
        assert_eq!(observer.print_every, 1);
    }
}

//! Submodule providing [`Stopper`], the Lagrangian loop's early-exit policy.

/// Stops the Lagrangian main loop once progress over a trailing window of
/// iterations is negligible both relatively and absolutely.
#[derive(Debug, Clone)]
pub struct Stopper {
    window: usize,
    relative_threshold: f64,
    absolute_threshold: f64,
    window_start_lb: Option<f64>,
    iterations_in_window: usize,
}

impl Stopper {
    /// A `Stopper` matching `spec.md` §4.4: a 100-iteration window, `0.1%`
    /// relative and `1.0` absolute thresholds, both must hold to stop.
    #[must_use]
    pub fn new_default() -> Self {
        Self::new(100, 0.001, 1.0)
    }

    /// A `Stopper` over a custom window and thresholds, e.g. the
    /// 300-iteration period used between phase 1's exit tests.
    #[must_use]
    pub fn new(window: usize, relative_threshold: f64, absolute_threshold: f64) -> Self {
        Self { window, relative_threshold, absolute_threshold, window_start_lb: None, iterations_in_window: 0 }
    }

    /// Records this iteration's lower bound and returns `true` if the loop
    /// should stop.
    pub fn observe(&mut self, lower_bound: f64) -> bool {
        let start = *self.window_start_lb.get_or_insert(lower_bound);
        self.iterations_in_window += 1;
        if self.iterations_in_window < self.window {
            return false;
        }
        let absolute_progress = (lower_bound - start).abs();
        let relative_progress = if start.abs() > f64::EPSILON { absolute_progress / start.abs() } else { 0.0 };
        self.window_start_lb = Some(lower_bound);
        self.iterations_in_window = 0;
        relative_progress < self.relative_threshold && absolute_progress < self.absolute_threshold
    }
}

impl Default for Stopper {
    fn default() -> Self {
        Self::new_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagnant_bound_stops_after_a_full_window() {
        let mut stopper = Stopper::new_default();
        let mut stopped = false;
        for _ in 0..100 {
            stopped = stopper.observe(10.0);
        }
        assert!(stopped);
    }

    #[test]
    fn steadily_improving_bound_does_not_stop() {
        let mut stopper = Stopper::new_default();
        let mut stopped = false;
        for i in 0..100 {
            stopped = stopper.observe(f64::from(i) * 10.0);
        }
        assert!(!stopped);
    }
}

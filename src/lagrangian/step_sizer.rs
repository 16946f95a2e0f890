//! Submodule providing [`StepSizer`], the adaptive step-size policy shared
//! by the Lagrangian engine and the CFT subgradient phase.

/// Adaptively contracts or expands the subgradient step size based on the
/// spread of the lower bound over a trailing window of iterations.
///
/// Every `window` iterations, computes `(max_lb - min_lb) / max_lb` over the
/// window: a spread at or below `plateau_threshold` means the bound has
/// stalled and the step is grown (`* growth`); a spread above
/// `oscillation_threshold` means the bound is bouncing and the step is
/// shrunk (`/ shrink`). The step is always clamped to `[min_step, max_step]`.
#[derive(Debug, Clone)]
pub struct StepSizer {
    step: f64,
    min_step: f64,
    max_step: f64,
    window: usize,
    growth: f64,
    shrink: f64,
    plateau_threshold: f64,
    oscillation_threshold: f64,
    recent: Vec<f64>,
}

impl StepSizer {
    /// A `StepSizer` matching the tunables named in `spec.md` §4.4/§4.5:
    /// initial step `0.1`, clamp `[1e-6, 10]`, 20-iteration window,
    /// `<= 0.1%` grows by `1.5`, `> 1%` shrinks by `2`.
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            step: 0.1,
            min_step: 1e-6,
            max_step: 10.0,
            window: 20,
            growth: 1.5,
            shrink: 2.0,
            plateau_threshold: 0.001,
            oscillation_threshold: 0.01,
            recent: Vec::with_capacity(20),
        }
    }

    /// A `StepSizer` with the same tunables as [`StepSizer::new_default`]
    /// but starting from `step` instead of `0.1`, so a phase can resume
    /// from the step size a previous phase left off at.
    #[must_use]
    pub fn with_step(step: f64) -> Self {
        Self { step, ..Self::new_default() }
    }

    /// The current step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Records the lower bound computed this iteration, adjusting the step
    /// size once `window` bounds have accumulated.
    pub fn observe(&mut self, lower_bound: f64) {
        self.recent.push(lower_bound);
        if self.recent.len() < self.window {
            return;
        }
        let max_lb = self.recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_lb = self.recent.iter().copied().fold(f64::INFINITY, f64::min);
        let spread = if max_lb.abs() > f64::EPSILON { (max_lb - min_lb) / max_lb } else { 0.0 };
        if spread <= self.plateau_threshold {
            self.step = (self.step * self.growth).min(self.max_step);
        } else if spread > self.oscillation_threshold {
            self.step = (self.step / self.shrink).max(self.min_step);
        }
        self.recent.clear();
    }
}

impl Default for StepSizer {
    fn default() -> Self {
        Self::new_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plateaued_bound_grows_the_step() {
        let mut sizer = StepSizer::new_default();
        for _ in 0..20 {
            sizer.observe(10.0);
        }
        assert!(sizer.step() > 0.1);
    }

    #[test]
    fn oscillating_bound_shrinks_the_step() {
        let mut sizer = StepSizer::new_default();
        for i in 0..20 {
            sizer.observe(if i % 2 == 0 { 0.0 } else { 100.0 });
        }
        assert!(sizer.step() < 0.1);
    }

    #[test]
    fn step_never_leaves_its_clamp() {
        let mut sizer = StepSizer::new_default();
        for _ in 0..2000 {
            sizer.observe(10.0);
        }
        assert!(sizer.step() <= 10.0);
    }
}

//! Step sequencing

use crate::models::OnboardingStep;

/// Position within the fixed onboarding sequence
///
/// Moves never validate anything and never fail: stepping past either end
/// or jumping to a step outside the sequence leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct StepNavigator {
    steps: &'static [OnboardingStep],
    index: usize,
}

impl StepNavigator {
    /// Start at the first step of the canonical sequence
    pub fn new() -> Self {
        Self::with_steps(&OnboardingStep::SEQUENCE)
    }

    /// Start at the first step of a custom sequence
    pub fn with_steps(steps: &'static [OnboardingStep]) -> Self {
        Self { steps, index: 0 }
    }

    pub fn current(&self) -> OnboardingStep {
        self.steps[self.index]
    }

    /// Zero-based position
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    /// Advance by one; returns whether the position changed
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Step back by one; returns whether the position changed
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to a step; returns whether it is part of the sequence
    pub fn go_to(&mut self, step: OnboardingStep) -> bool {
        match self.steps.iter().position(|s| *s == step) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Fraction of the sequence reached, in (0, 1]
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.steps.len() as f64
    }
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self::new()
    }
}

//! Cardinality bounds for multi-choice answers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Inclusive `{min, max}` bound on how many options may be picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub min: usize,
    pub max: usize,
}

impl SelectionBounds {
    /// Create bounds; `max` is raised to `min` if given smaller
    pub const fn new(min: usize, max: usize) -> Self {
        let max = if max < min { min } else { max };
        Self { min, max }
    }

    /// Whether `count` selections satisfy the bounds
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

impl fmt::Display for SelectionBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "exactly {}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// Flip membership of `value` in `set`, returning whether it is now selected
pub fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let bounds = SelectionBounds::new(3, 6);
        assert!(!bounds.contains(0));
        assert!(!bounds.contains(2));
        assert!(bounds.contains(3));
        assert!(bounds.contains(4));
        assert!(bounds.contains(6));
        assert!(!bounds.contains(7));
    }

    #[test]
    fn test_inverted_bounds_are_raised() {
        let bounds = SelectionBounds::new(4, 2);
        assert_eq!(bounds.max, 4);
        assert!(bounds.contains(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(SelectionBounds::new(1, 3).to_string(), "1 to 3");
        assert_eq!(SelectionBounds::new(2, 2).to_string(), "exactly 2");
    }

    #[test]
    fn test_toggle() {
        let mut set = BTreeSet::new();
        assert!(toggle(&mut set, "brunch"));
        assert!(set.contains("brunch"));
        assert!(!toggle(&mut set, "brunch"));
        assert!(set.is_empty());
    }
}

//! Weighted outcome tables
//!
//! One uniform draw selects an outcome by cumulative weight. Weights need
//! not sum to 1; the roll is scaled by the table total.

use rand::Rng;

/// A list of `(weight, outcome)` pairs
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(f32, T)>,
    total: f32,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table; non-positive or non-finite weights are dropped
    pub fn new(entries: impl IntoIterator<Item = (f32, T)>) -> Self {
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|(w, _)| w.is_finite() && *w > 0.0)
            .collect();
        let total: f32 = entries.iter().map(|(w, _)| w).sum();
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select the outcome for `roll` in `[0, 1)`
    ///
    /// Rolls at or beyond 1.0 land on the last entry so float rounding in
    /// the cumulative sum can never fall off the end.
    pub fn select(&self, roll: f32) -> Option<T> {
        let threshold = roll.clamp(0.0, 1.0) * self.total;
        let mut cumulative = 0.0;
        for &(weight, outcome) in &self.entries {
            cumulative += weight;
            if threshold < cumulative {
                return Some(outcome);
            }
        }
        self.entries.last().map(|&(_, outcome)| outcome)
    }

    /// Draw one outcome
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        self.select(rng.random::<f32>())
    }
}

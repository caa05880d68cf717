//! Fixed-size value history for line graphs.

/// Default number of values kept for a line graph.
pub const HISTORY_LEN: usize = 10;

/// Most recent readings of a source, oldest first.
///
/// Length is constant: each push evicts the oldest value. Missing readings
/// are stored as NaN so that gaps stay visible on the graph.
#[derive(Debug, Clone)]
pub struct History {
    values: Vec<f64>,
}

impl History {
    /// Creates a history of `len` NaN values.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![f64::NAN; len],
        }
    }

    /// Appends a value and drops the oldest.
    pub fn push(&mut self, value: f64) {
        let len = self.values.len();
        self.values.push(value);
        let excess = self.values.len() - len;
        self.values.drain(..excess);
    }

    /// Returns the stored values, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_nan() {
        let history = History::default();
        assert_eq!(history.len(), HISTORY_LEN);
        assert!(history.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut history = History::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            history.push(v);
        }
        assert_eq!(history.values(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_length_is_constant() {
        let mut history = History::default();
        for i in 0..100 {
            history.push(i as f64);
            assert_eq!(history.len(), HISTORY_LEN);
        }
    }

    #[test]
    fn test_nan_is_kept() {
        let mut history = History::new(2);
        history.push(1.0);
        history.push(f64::NAN);
        assert_eq!(history.values()[0], 1.0);
        assert!(history.values()[1].is_nan());
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new(0);
        history.push(1.0);
        assert!(history.is_empty());
        assert!(history.values().is_empty());
    }
}

//! Host-side view of a single poll.

use crate::CustomDataSource;
use serde::Serialize;

/// Outcome of a numeric fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Numeric {
    /// A freshly fetched value.
    Fresh(f64),
    /// The source has no numeric value.
    Unsupported,
    /// The fetch failed with the given reason.
    Failed(String),
}

impl Numeric {
    /// Flattens to a plain value, NaN when there is none.
    pub fn value(&self) -> f64 {
        match self {
            Numeric::Fresh(v) => *v,
            Numeric::Unsupported | Numeric::Failed(_) => f64::NAN,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Numeric::Fresh(_))
    }
}

/// All three views of a source after one poll.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub source: String,
    pub numeric: Numeric,
    pub text: String,
    pub history: Option<Vec<f64>>,
}

/// Polls a source once: fetch, then format, then read history.
pub fn poll(source: &mut dyn CustomDataSource) -> Reading {
    let numeric = match source.as_numeric() {
        Ok(Some(v)) => Numeric::Fresh(v),
        Ok(None) => Numeric::Unsupported,
        Err(e) => Numeric::Failed(e.to_string()),
    };

    Reading {
        source: source.name().to_string(),
        numeric,
        text: source.as_string(),
        history: source.last_values().map(<[f64]>::to_vec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Result, SensorError};

    struct Flaky {
        calls: u32,
    }

    impl CustomDataSource for Flaky {
        fn name(&self) -> &str {
            "flaky"
        }

        fn as_numeric(&mut self) -> Result<Option<f64>> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(SensorError::NoResults)
            } else {
                Ok(Some(0.0))
            }
        }

        fn as_string(&self) -> String {
            format!("{} calls", self.calls)
        }

        fn last_values(&self) -> Option<&[f64]> {
            None
        }
    }

    #[test]
    fn test_fresh_zero_is_distinct_from_failure() {
        let mut source = Flaky { calls: 0 };

        let first = poll(&mut source);
        assert_eq!(first.numeric, Numeric::Fresh(0.0));
        assert_eq!(first.numeric.value(), 0.0);
        assert_eq!(first.text, "1 calls");
        assert!(first.history.is_none());

        let second = poll(&mut source);
        assert!(!second.numeric.is_fresh());
        assert!(matches!(second.numeric, Numeric::Failed(_)));
        assert!(second.numeric.value().is_nan());
    }

    #[test]
    fn test_unsupported_is_nan() {
        assert!(Numeric::Unsupported.value().is_nan());
    }
}

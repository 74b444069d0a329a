//! Runtime configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LINE_CAPACITY;

/// Tunables for the console adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RuntimeConfig {
    /// Characters reserved up front for each line read.
    pub line_capacity: usize,
    /// Longest accepted line. Longer input fails with `CapacityExceeded` and
    /// the rest of that line is discarded. A carriage return dropped by
    /// `trim_carriage_return` does not count towards the limit.
    pub max_line_length: Option<usize>,
    /// Drop a trailing carriage return from lines read.
    pub trim_carriage_return: bool,
}

impl RuntimeConfig {
    /// Set the maximum line length.
    #[must_use]
    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            line_capacity: DEFAULT_LINE_CAPACITY,
            max_line_length: None,
            trim_carriage_return: false,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RuntimeConfig = serde_json::from_str(r#"{"max_line_length": 16}"#).unwrap();
        assert_eq!(config.max_line_length, Some(16));
        assert_eq!(config.line_capacity, DEFAULT_LINE_CAPACITY);
        assert!(!config.trim_carriage_return);
    }
}

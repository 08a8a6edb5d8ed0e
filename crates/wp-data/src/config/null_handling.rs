//! Null value handling for data loading

use serde::{Serialize, Deserialize};

/// Null value configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    /// Markers the World Bank exports use for missing cells
    fn default() -> Self {
        Self {
            patterns: ["", "NA", "N/A", "NaN", "null", "None", "#N/A", "-"]
                .into_iter()
                .map(String::from)
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Cell value, or `None` if it matches a null pattern
    pub fn value<'a>(&self, value: &'a str) -> Option<&'a str> {
        if self.is_null(value) {
            None
        } else if self.trim_whitespace {
            Some(value.trim())
        } else {
            Some(value)
        }
    }
}

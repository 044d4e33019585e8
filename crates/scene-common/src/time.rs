//! Time range handling for catalog queries.

use serde::{Deserialize, Serialize};

/// Time range used when a request does not supply one.
pub const DEFAULT_TIME_OF_INTEREST: &str = "2021-01-01/2021-12-31";

/// An interval of the form `"start/end"`.
///
/// The value is handed to the catalog exactly as received; interpreting it is
/// the catalog's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeRange(String);

impl TimeRange {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self(DEFAULT_TIME_OF_INTEREST.to_string())
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        assert_eq!(TimeRange::default().as_str(), "2021-01-01/2021-12-31");
    }

    #[test]
    fn test_passes_through_unmodified() {
        let range = TimeRange::new("not even a date");
        assert_eq!(range.as_str(), "not even a date");
        assert_eq!(serde_json::to_string(&range).unwrap(), "\"not even a date\"");
    }
}

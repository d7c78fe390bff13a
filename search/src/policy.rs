//! Search run policy.

use crate::error::SearchError;

/// Step budget and audit configuration for bounded runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on `step` calls made by one bounded run.
    pub max_steps: u64,
    /// Record one `ExpandEventV1` per expansion.
    pub record_events: bool,
}

impl SearchPolicyV1 {
    /// Validate that this policy can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_steps` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_steps == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_steps must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            record_events: true,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Policy dials for the eligibility engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Admit the candidate when a survey's filters cannot be decoded.
    pub fail_open: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self { fail_open: true }
    }
}

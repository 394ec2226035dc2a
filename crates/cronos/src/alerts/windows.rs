use serde::{Deserialize, Serialize};
use std::fmt;

/// Day thresholds for the due-soon buckets.
///
/// Values are expected to satisfy `window30 < window60 < window90`, but only
/// positivity is enforced; bucketing is first-match so a non-ascending set
/// still yields disjoint buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub window30: i64,
    pub window60: i64,
    pub window90: i64,
}

/// Fallback applied to tenants without an override.
pub const DEFAULT_WINDOWS: WindowSettings = WindowSettings {
    window30: 30,
    window60: 60,
    window90: 90,
};

impl Default for WindowSettings {
    fn default() -> Self {
        DEFAULT_WINDOWS
    }
}

impl WindowSettings {
    fn fields(&self) -> [(&'static str, i64); 3] {
        [
            ("window30", self.window30),
            ("window60", self.window60),
            ("window90", self.window90),
        ]
    }

    fn violations(&self) -> Vec<WindowViolation> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| *value <= 0)
            .map(|(field, value)| WindowViolation { field, value })
            .collect()
    }

    /// Gate for settings updates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    /// Gate for aggregation: settings that reach the classifier must be usable.
    pub fn ensure_usable(&self) -> Result<(), InvalidConfigurationError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(InvalidConfigurationError { violations })
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.window30 < self.window60 && self.window60 < self.window90
    }

    pub fn apply(&self, update: &WindowSettingsUpdate) -> Self {
        Self {
            window30: update.window30.unwrap_or(self.window30),
            window60: update.window60.unwrap_or(self.window60),
            window90: update.window90.unwrap_or(self.window90),
        }
    }
}

/// Settings change payload; omitted fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettingsUpdate {
    #[serde(default)]
    pub window30: Option<i64>,
    #[serde(default)]
    pub window60: Option<i64>,
    #[serde(default)]
    pub window90: Option<i64>,
}

impl From<WindowSettings> for WindowSettingsUpdate {
    fn from(value: WindowSettings) -> Self {
        Self {
            window30: Some(value.window30),
            window60: Some(value.window60),
            window90: Some(value.window90),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowViolation {
    pub field: &'static str,
    pub value: i64,
}

impl fmt::Display for WindowViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be a positive number of days (got {})", self.field, self.value)
    }
}

fn join_violations(violations: &[WindowViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings update rejected; nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid alert windows: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<WindowViolation>,
}

/// Window settings handed to the aggregator cannot classify anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("alert windows are misconfigured: {}", join_violations(.violations))]
pub struct InvalidConfigurationError {
    pub violations: Vec<WindowViolation>,
}

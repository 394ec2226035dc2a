use super::domain::{Bucket, ExpiryBoundary, Status};
use super::windows::{InvalidConfigurationError, WindowSettings};

/// Classify with the default boundary (expired only once strictly past due).
pub fn classify(days_to_due: i64, windows: &WindowSettings) -> Status {
    StatusClassifier::unchecked(*windows, ExpiryBoundary::default()).status(days_to_due)
}

/// Maps remaining days to a status and a summary bucket.
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier {
    windows: WindowSettings,
    boundary: ExpiryBoundary,
}

impl StatusClassifier {
    pub fn new(
        windows: WindowSettings,
        boundary: ExpiryBoundary,
    ) -> Result<Self, InvalidConfigurationError> {
        windows.ensure_usable()?;
        Ok(Self::unchecked(windows, boundary))
    }

    const fn unchecked(windows: WindowSettings, boundary: ExpiryBoundary) -> Self {
        Self { windows, boundary }
    }

    pub const fn windows(&self) -> WindowSettings {
        self.windows
    }

    pub fn status(&self, days_to_due: i64) -> Status {
        if self.boundary.is_expired(days_to_due) {
            Status::Expired
        } else if days_to_due <= self.windows.window90 {
            Status::DueSoon
        } else {
            Status::Valid
        }
    }

    /// First matching window wins, so buckets never overlap. Anything past
    /// `window90` is valid and stays out of every bucket, even when the
    /// smaller windows are configured larger than it.
    pub fn bucket(&self, days_to_due: i64) -> Option<Bucket> {
        if self.boundary.is_expired(days_to_due) {
            Some(Bucket::Expired)
        } else if days_to_due > self.windows.window90 {
            None
        } else if days_to_due <= self.windows.window30 {
            Some(Bucket::Due30)
        } else if days_to_due <= self.windows.window60 {
            Some(Bucket::Due60)
        } else {
            Some(Bucket::Due90)
        }
    }
}

//! Due-date calculation, status classification, and alert aggregation for
//! tracked exams, trainings, and documents.
//!
//! Data flows from the per-tenant [`WindowSettingsStore`] through the
//! [`StatusClassifier`] into the [`AlertAggregator`], which yields a bucket
//! summary and an urgency-ordered item list. Everything except the settings
//! store is a pure computation over its inputs.

pub mod aggregator;
pub mod classifier;
pub mod domain;
pub mod due_date;
pub mod router;
pub mod service;
pub mod settings;
pub mod source;
pub mod views;
pub mod windows;

#[cfg(test)]
mod tests;

pub use aggregator::{build_alerts, AlertAggregator};
pub use classifier::{classify, StatusClassifier};
pub use domain::{
    Bucket, Category, DocumentKind, DocumentRecord, ExamKind, ExamRecord, ExpiryBoundary, ItemId,
    Status, TenantId, TrackableItem, TrainingRecord,
};
pub use due_date::{compute_due_date, days_to_due, InvalidDateError};
pub use router::alert_router;
pub use service::{AlertServiceError, Clock, ComplianceAlertService, FixedClock, SystemClock};
pub use settings::{RepositoryError, SettingsError, SettingsRepository, WindowSettingsStore};
pub use source::{CsvItemImporter, ItemImportError, ItemSource, SourceError};
pub use views::{AlertItem, AlertReport, AlertSummary, SkippedItem};
pub use windows::{
    InvalidConfigurationError, ValidationError, WindowSettings, WindowSettingsUpdate,
    WindowViolation, DEFAULT_WINDOWS,
};

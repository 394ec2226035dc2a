mod import;
mod parser;

use super::domain::{TenantId, TrackableItem};

pub use import::{CsvItemImporter, ItemImportError};

/// Yields every trackable record of a tenant (exams, trainings, documents).
pub trait ItemSource: Send + Sync {
    fn items_for_tenant(&self, tenant: &TenantId) -> Result<Vec<TrackableItem>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("item source unavailable: {0}")]
    Unavailable(String),
}

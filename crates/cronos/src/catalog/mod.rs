//! Tenant-independent reference list of exam, training, and document types
//! with their default validity periods.

mod standard;

use crate::alerts::domain::{Category, DocumentKind, ExamKind};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LegalReference {
    pub norm: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamCatalogEntry {
    pub kind: ExamKind,
    pub name: &'static str,
    pub validity_days: i64,
    pub reference: LegalReference,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingCatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub validity_days: i64,
    pub workload_hours: u16,
    pub reference: LegalReference,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentCatalogEntry {
    pub kind: DocumentKind,
    pub name: &'static str,
    pub validity_days: i64,
    pub reference: LegalReference,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceCatalog {
    exams: Vec<ExamCatalogEntry>,
    trainings: Vec<TrainingCatalogEntry>,
    documents: Vec<DocumentCatalogEntry>,
}

impl ComplianceCatalog {
    pub fn standard() -> Self {
        Self {
            exams: standard::exam_entries(),
            trainings: standard::training_entries(),
            documents: standard::document_entries(),
        }
    }

    pub fn exams(&self) -> &[ExamCatalogEntry] {
        &self.exams
    }

    pub fn trainings(&self) -> &[TrainingCatalogEntry] {
        &self.trainings
    }

    pub fn documents(&self) -> &[DocumentCatalogEntry] {
        &self.documents
    }

    pub fn exam(&self, kind: ExamKind) -> Option<&ExamCatalogEntry> {
        self.exams.iter().find(|entry| entry.kind == kind)
    }

    /// Matches `NR-35`, `nr35`, and `NR 35` alike.
    pub fn training(&self, code: &str) -> Option<&TrainingCatalogEntry> {
        let wanted = normalize_code(code);
        self.trainings
            .iter()
            .find(|entry| normalize_code(entry.code) == wanted)
    }

    pub fn document(&self, kind: DocumentKind) -> Option<&DocumentCatalogEntry> {
        self.documents.iter().find(|entry| entry.kind == kind)
    }

    /// Default validity for a `kind` code within `category`, if cataloged.
    pub fn default_validity(&self, category: Category, kind: &str) -> Option<i64> {
        match category {
            Category::Exam => ExamKind::from_code(kind)
                .and_then(|kind| self.exam(kind))
                .map(|entry| entry.validity_days),
            Category::Training => self.training(kind).map(|entry| entry.validity_days),
            Category::Document => self
                .document(DocumentKind::from_code(kind))
                .map(|entry| entry.validity_days),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_uppercase()
}

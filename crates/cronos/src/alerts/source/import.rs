use super::parser::{self, ItemRow};
use crate::alerts::domain::{
    Category, DocumentKind, DocumentRecord, ExamKind, ExamRecord, ItemId, TrackableItem,
    TrainingRecord,
};
use crate::catalog::ComplianceCatalog;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ItemImportError {
    #[error("failed to read item export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid item CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown category '{value}'")]
    UnknownCategory { row: usize, value: String },
    #[error("row {row}: unknown exam kind '{value}'")]
    UnknownExamKind { row: usize, value: String },
    #[error("row {row}: training code is required")]
    MissingTrainingCode { row: usize },
    #[error("row {row}: validity_days '{value}' is not a whole number of days")]
    InvalidValidity { row: usize, value: String },
    #[error("row {row}: no validity_days given and '{kind}' has no catalog default")]
    MissingValidity { row: usize, kind: String },
}

/// Loads tracked records from a spreadsheet export with the columns
/// `id, category, label, employee, reference_date, validity_days, kind`.
///
/// Malformed reference dates are kept as absent so the aggregator can report
/// the item as skipped; structural problems (unknown category, unresolvable
/// validity) fail the whole import.
pub struct CsvItemImporter;

impl CsvItemImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &ComplianceCatalog,
    ) -> Result<Vec<TrackableItem>, ItemImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &ComplianceCatalog,
    ) -> Result<Vec<TrackableItem>, ItemImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .enumerate()
            // header is line 1
            .map(|(index, row)| item_from_row(index + 2, row, catalog))
            .collect()
    }
}

fn item_from_row(
    row_number: usize,
    row: ItemRow,
    catalog: &ComplianceCatalog,
) -> Result<TrackableItem, ItemImportError> {
    let category =
        Category::from_code(&row.category).ok_or_else(|| ItemImportError::UnknownCategory {
            row: row_number,
            value: row.category.clone(),
        })?;

    let reference_date = row.reference_date.as_deref().and_then(|raw| {
        let parsed = parser::parse_date(raw);
        if parsed.is_none() {
            tracing::warn!(row = row_number, id = %row.id, raw, "unparseable reference date");
        }
        parsed
    });

    let kind = row.kind.clone().unwrap_or_default();
    let validity_days = resolve_validity(row_number, &row, category, &kind, catalog)?;
    let id = ItemId(row.id);

    let item = match category {
        Category::Exam => {
            let exam_kind =
                ExamKind::from_code(&kind).ok_or_else(|| ItemImportError::UnknownExamKind {
                    row: row_number,
                    value: kind.clone(),
                })?;
            TrackableItem::Exam(ExamRecord {
                id,
                kind: exam_kind,
                title: row.label,
                employee_name: row.employee,
                reference_date,
                validity_days,
            })
        }
        Category::Training => {
            if kind.is_empty() {
                return Err(ItemImportError::MissingTrainingCode { row: row_number });
            }
            let entry = catalog.training(&kind);
            let code = entry.map(|entry| entry.code.to_string()).unwrap_or(kind);
            let title = row
                .label
                .or_else(|| entry.map(|entry| format!("{} {}", entry.code, entry.name)))
                .unwrap_or_else(|| code.clone());
            TrackableItem::Training(TrainingRecord {
                id,
                code,
                title,
                employee_name: row.employee,
                reference_date,
                validity_days,
            })
        }
        Category::Document => {
            let document_kind = DocumentKind::from_code(&kind);
            let title = row
                .label
                .unwrap_or_else(|| document_kind.label().to_string());
            TrackableItem::Document(DocumentRecord {
                id,
                kind: document_kind,
                title,
                reference_date,
                validity_days,
            })
        }
    };

    Ok(item)
}

fn resolve_validity(
    row_number: usize,
    row: &ItemRow,
    category: Category,
    kind: &str,
    catalog: &ComplianceCatalog,
) -> Result<i64, ItemImportError> {
    match row.validity_days.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ItemImportError::InvalidValidity {
                row: row_number,
                value: raw.to_string(),
            }),
        None => catalog
            .default_validity(category, kind)
            .ok_or_else(|| ItemImportError::MissingValidity {
                row: row_number,
                kind: kind.to_string(),
            }),
    }
}

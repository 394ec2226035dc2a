use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::due_date::{compute_due_date, InvalidDateError};

/// Client company account; every query and settings change is scoped to one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declaration order is the tie-break order used when sorting alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Exam,
    Training,
    Document,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exam => "ASO",
            Self::Training => "Training",
            Self::Document => "Document",
        }
    }

    /// Accepts the spellings found in spreadsheet exports ("aso", "exame", "treinamento", ...).
    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exam" | "aso" | "exame" => Some(Self::Exam),
            "training" | "treinamento" => Some(Self::Training),
            "document" | "documento" => Some(Self::Document),
            _ => None,
        }
    }
}

/// ASO exam kinds defined by NR-07.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamKind {
    Admission,
    Periodic,
    ReturnToWork,
    ChangeOfFunction,
    Dismissal,
}

impl ExamKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Admission,
            Self::Periodic,
            Self::ReturnToWork,
            Self::ChangeOfFunction,
            Self::Dismissal,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admission => "ASO Admissional",
            Self::Periodic => "ASO Periódico",
            Self::ReturnToWork => "ASO de Retorno ao Trabalho",
            Self::ChangeOfFunction => "ASO de Mudança de Função",
            Self::Dismissal => "ASO Demissional",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admission" | "admissional" => Some(Self::Admission),
            "periodic" | "periodico" | "periódico" => Some(Self::Periodic),
            "return_to_work" | "retorno" | "retorno_ao_trabalho" => Some(Self::ReturnToWork),
            "change_of_function" | "mudanca_de_funcao" | "mudança_de_função" => {
                Some(Self::ChangeOfFunction)
            }
            "dismissal" | "demissional" => Some(Self::Dismissal),
            _ => None,
        }
    }
}

/// Company-scoped program documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pgr,
    Pcmso,
    Ltcat,
    Other,
}

impl DocumentKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pgr, Self::Pcmso, Self::Ltcat]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pgr => "PGR",
            Self::Pcmso => "PCMSO",
            Self::Ltcat => "LTCAT",
            Self::Other => "Document",
        }
    }

    pub fn from_code(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pgr" => Self::Pgr,
            "pcmso" => Self::Pcmso,
            "ltcat" => Self::Ltcat,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    pub id: ItemId,
    pub kind: ExamKind,
    /// Overrides the kind's label when the source names the exam itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    pub validity_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub id: ItemId,
    /// Regulation code such as `NR-35`.
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    pub validity_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: ItemId,
    pub kind: DocumentKind,
    pub title: String,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    pub validity_days: i64,
}

/// Anything with a reference date and a validity period that can come due.
///
/// The variants differ only in which descriptive fields they carry; due-date
/// math and classification treat them uniformly through the accessors below.
/// A `reference_date` of `None` marks a date that was missing or malformed at
/// the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum TrackableItem {
    Exam(ExamRecord),
    Training(TrainingRecord),
    Document(DocumentRecord),
}

impl TrackableItem {
    pub fn id(&self) -> &ItemId {
        match self {
            Self::Exam(record) => &record.id,
            Self::Training(record) => &record.id,
            Self::Document(record) => &record.id,
        }
    }

    pub const fn category(&self) -> Category {
        match self {
            Self::Exam(_) => Category::Exam,
            Self::Training(_) => Category::Training,
            Self::Document(_) => Category::Document,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Exam(record) => record.title.as_deref().unwrap_or(record.kind.label()),
            Self::Training(record) => &record.title,
            Self::Document(record) => &record.title,
        }
    }

    pub fn employee_name(&self) -> Option<&str> {
        match self {
            Self::Exam(record) => record.employee_name.as_deref(),
            Self::Training(record) => record.employee_name.as_deref(),
            Self::Document(_) => None,
        }
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Exam(record) => record.reference_date,
            Self::Training(record) => record.reference_date,
            Self::Document(record) => record.reference_date,
        }
    }

    pub fn validity_days(&self) -> i64 {
        match self {
            Self::Exam(record) => record.validity_days,
            Self::Training(record) => record.validity_days,
            Self::Document(record) => record.validity_days,
        }
    }

    pub fn due_date(&self) -> Result<NaiveDate, InvalidDateError> {
        let reference_date = self
            .reference_date()
            .ok_or(InvalidDateError::MissingReferenceDate)?;
        compute_due_date(reference_date, self.validity_days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Expired,
    DueSoon,
    Valid,
}

impl Status {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::DueSoon => "Due Soon",
            Self::Valid => "Valid",
        }
    }
}

/// Disjoint summary buckets over `days_to_due`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Expired,
    Due30,
    Due60,
    Due90,
}

impl Bucket {
    pub const fn ordered() -> [Self; 4] {
        [Self::Expired, Self::Due30, Self::Due60, Self::Due90]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Due30 => "due30",
            Self::Due60 => "due60",
            Self::Due90 => "due90",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|bucket| bucket.code().eq_ignore_ascii_case(value.trim()))
    }
}

/// Where the line between "due soon" and "expired" falls.
///
/// `AfterDueDate` keeps an item valid through its due date, so day 0 is still
/// due soon. `OnDueDate` treats the due date itself as expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryBoundary {
    #[default]
    AfterDueDate,
    OnDueDate,
}

impl ExpiryBoundary {
    pub const fn is_expired(self, days_to_due: i64) -> bool {
        match self {
            Self::AfterDueDate => days_to_due < 0,
            Self::OnDueDate => days_to_due <= 0,
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "after_due_date" | "after" => Some(Self::AfterDueDate),
            "on_due_date" | "on" => Some(Self::OnDueDate),
            _ => None,
        }
    }
}

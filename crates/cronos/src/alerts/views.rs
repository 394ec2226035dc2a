use super::domain::{Bucket, Category, ItemId, Status};
use super::due_date::InvalidDateError;
use super::windows::WindowSettings;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub expired: usize,
    pub due30: usize,
    pub due60: usize,
    pub due90: usize,
}

impl AlertSummary {
    pub(crate) fn record(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Expired => self.expired += 1,
            Bucket::Due30 => self.due30 += 1,
            Bucket::Due60 => self.due60 += 1,
            Bucket::Due90 => self.due90 += 1,
        }
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Expired => self.expired,
            Bucket::Due30 => self.due30,
            Bucket::Due60 => self.due60,
            Bucket::Due90 => self.due90,
        }
    }

    pub fn total(&self) -> usize {
        self.expired + self.due30 + self.due60 + self.due90
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertItem {
    pub id: ItemId,
    pub category: Category,
    pub category_label: &'static str,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub reference_date: NaiveDate,
    pub validity_days: i64,
    pub due_date: NaiveDate,
    pub days_to_due: i64,
    pub status: Status,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub id: ItemId,
    pub category: Category,
    pub error: InvalidDateError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReport {
    pub as_of: NaiveDate,
    pub windows: WindowSettings,
    pub summary: AlertSummary,
    pub items: Vec<AlertItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedItem>,
}

use super::classifier::StatusClassifier;
use super::domain::{Bucket, ExpiryBoundary, TrackableItem};
use super::due_date::{compute_due_date, days_to_due, InvalidDateError};
use super::views::{AlertItem, AlertReport, AlertSummary, SkippedItem};
use super::windows::{InvalidConfigurationError, WindowSettings};
use chrono::NaiveDate;

/// Classify every item against `windows` as of `as_of`, using the default
/// expiry boundary.
pub fn build_alerts(
    items: &[TrackableItem],
    windows: WindowSettings,
    as_of: NaiveDate,
    filter: Option<Bucket>,
) -> Result<AlertReport, InvalidConfigurationError> {
    let aggregator = AlertAggregator::new(windows, ExpiryBoundary::default())?;
    Ok(aggregator.aggregate(items, as_of, filter))
}

#[derive(Debug, Clone, Copy)]
pub struct AlertAggregator {
    classifier: StatusClassifier,
}

impl AlertAggregator {
    pub fn new(
        windows: WindowSettings,
        boundary: ExpiryBoundary,
    ) -> Result<Self, InvalidConfigurationError> {
        Ok(Self {
            classifier: StatusClassifier::new(windows, boundary)?,
        })
    }

    /// Items whose due date cannot be computed are reported in `skipped`
    /// instead of failing the batch. The summary always covers every
    /// classified item; `filter` only narrows the returned list.
    pub fn aggregate(
        &self,
        items: &[TrackableItem],
        as_of: NaiveDate,
        filter: Option<Bucket>,
    ) -> AlertReport {
        let mut summary = AlertSummary::default();
        let mut alerts = Vec::new();
        let mut skipped = Vec::new();

        for item in items {
            let dates = item
                .reference_date()
                .ok_or(InvalidDateError::MissingReferenceDate)
                .and_then(|reference_date| {
                    compute_due_date(reference_date, item.validity_days())
                        .map(|due_date| (reference_date, due_date))
                });
            let (reference_date, due_date) = match dates {
                Ok(dates) => dates,
                Err(error) => {
                    tracing::warn!(item_id = %item.id(), %error, "skipping item without a usable due date");
                    skipped.push(SkippedItem {
                        id: item.id().clone(),
                        category: item.category(),
                        error,
                    });
                    continue;
                }
            };

            let days = days_to_due(due_date, as_of);
            let status = self.classifier.status(days);
            let bucket = self.classifier.bucket(days);
            if let Some(bucket) = bucket {
                summary.record(bucket);
            }

            if filter.is_some() && bucket != filter {
                continue;
            }

            alerts.push(AlertItem {
                id: item.id().clone(),
                category: item.category(),
                category_label: item.category().label(),
                label: item.label().to_string(),
                employee_name: item.employee_name().map(str::to_string),
                reference_date,
                validity_days: item.validity_days(),
                due_date,
                days_to_due: days,
                status,
                status_label: status.label(),
                bucket,
            });
        }

        alerts.sort_by(|a, b| {
            a.days_to_due
                .cmp(&b.days_to_due)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.label.cmp(&b.label))
                .then_with(|| a.id.cmp(&b.id))
        });

        AlertReport {
            as_of,
            windows: self.classifier.windows(),
            summary,
            items: alerts,
            skipped,
        }
    }
}

use super::common::*;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::alerts::domain::{Bucket, ExpiryBoundary, Status};
use crate::alerts::service::{AlertServiceError, ComplianceAlertService, FixedClock};
use crate::alerts::settings::SettingsError;
use crate::alerts::source::SourceError;
use crate::alerts::windows::{WindowSettings, WindowSettingsUpdate};
use crate::config::AlertConfig;

#[test]
fn summary_uses_clock_when_as_of_missing() {
    let (service, _) = build_service();
    let summary = service.summary(&acme(), None).expect("summary");

    assert_eq!(summary.expired, 1);
    assert_eq!(summary.due30, 1);
    assert_eq!(summary.due60, 1);
    assert_eq!(summary.due90, 1);
    assert_eq!(summary.total(), 4);
}

#[test]
fn summary_matches_report_counts() {
    let (service, _) = build_service();
    let as_of = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let summary = service.summary(&acme(), Some(as_of)).expect("summary");
    let report = service.alerts(&acme(), None, Some(as_of)).expect("report");

    assert_eq!(summary, report.summary);
    for bucket in Bucket::ordered() {
        let listed = report
            .items
            .iter()
            .filter(|item| item.bucket == Some(bucket))
            .count();
        assert_eq!(listed, summary.count(bucket), "bucket {bucket:?}");
    }
}

#[test]
fn filtered_report_only_lists_matching_bucket() {
    let (service, _) = build_service();
    let report = service
        .alerts(&acme(), Some(Bucket::Expired), None)
        .expect("report");

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].status, Status::Expired);
    assert_eq!(report.summary.total(), 4);
}

#[test]
fn on_due_date_boundary_expires_items_due_today() {
    let source = Arc::new(MemorySource::with(acme(), acme_items()));
    let config = AlertConfig {
        expiry_boundary: ExpiryBoundary::OnDueDate,
        ..AlertConfig::default()
    };
    // Moving as_of forward twenty days puts the NR-35 training exactly on its due date.
    let as_of = today() + chrono::Duration::days(20);
    let service = ComplianceAlertService::with_clock(
        source,
        Arc::new(MemorySettings::default()),
        &config,
        Arc::new(FixedClock(as_of)),
    );

    let report = service.alerts(&acme(), None, None).expect("report");
    let training = report
        .items
        .iter()
        .find(|item| item.id.0 == "nr35-bruno")
        .expect("training listed");

    assert_eq!(service.expiry_boundary(), ExpiryBoundary::OnDueDate);
    assert_eq!(training.days_to_due, 0);
    assert_eq!(training.status, Status::Expired);
    assert_eq!(report.summary.expired, 2);
}

#[test]
fn settings_updates_change_classification_for_that_tenant_only() {
    let source = MemorySource::with(acme(), acme_items());
    let shared = Arc::new(source);
    let settings = Arc::new(MemorySettings::default());
    let service = ComplianceAlertService::with_clock(
        shared,
        settings,
        &AlertConfig::default(),
        Arc::new(FixedClock(today())),
    );

    let updated = service
        .update_settings(
            &acme(),
            WindowSettingsUpdate {
                window90: Some(120),
                ..WindowSettingsUpdate::default()
            },
        )
        .expect("update accepted");

    assert_eq!(
        updated,
        WindowSettings {
            window30: 30,
            window60: 60,
            window90: 120,
        }
    );
    assert_eq!(service.settings(&acme()).unwrap(), updated);
    assert_eq!(service.settings(&globex()).unwrap(), WindowSettings::default());
}

#[test]
fn rejected_update_reports_validation_error() {
    let (service, settings) = build_service();

    let error = service
        .update_settings(
            &acme(),
            WindowSettingsUpdate {
                window60: Some(-1),
                ..WindowSettingsUpdate::default()
            },
        )
        .expect_err("negative window rejected");

    match error {
        AlertServiceError::Settings(SettingsError::Validation(validation)) => {
            assert_eq!(validation.violations.len(), 1);
            assert_eq!(validation.violations[0].field, "window60");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(settings.stored(&acme()).is_none());
}

#[test]
fn source_failures_propagate() {
    let service = ComplianceAlertService::with_clock(
        Arc::new(OfflineSource),
        Arc::new(MemorySettings::default()),
        &AlertConfig::default(),
        Arc::new(FixedClock(today())),
    );

    assert!(matches!(
        service.summary(&acme(), None),
        Err(AlertServiceError::Source(SourceError::Unavailable(_)))
    ));
}

#[test]
fn corrupt_stored_windows_fail_as_configuration_error() {
    let service = ComplianceAlertService::with_clock(
        Arc::new(MemorySource::with(acme(), acme_items())),
        Arc::new(CorruptSettings),
        &AlertConfig::default(),
        Arc::new(FixedClock(today())),
    );

    match service.alerts(&acme(), None, None) {
        Err(AlertServiceError::Configuration(error)) => {
            assert_eq!(error.violations[0].field, "window30");
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn repeated_queries_are_stable() {
    let (service, _) = build_service();
    let first = service.alerts(&acme(), None, None).expect("first");
    let second = service.alerts(&acme(), None, None).expect("second");
    assert_eq!(first, second);
}

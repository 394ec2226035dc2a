use chrono::{Local, NaiveDate};
use clap::Args;
use cronos::alerts::{
    AlertAggregator, AlertReport, Bucket, CsvItemImporter, ExpiryBoundary, WindowSettings,
    WindowSettingsUpdate,
};
use cronos::catalog::ComplianceCatalog;
use cronos::config::AlertConfig;
use cronos::error::AppError;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct AlertReportArgs {
    /// CSV export with columns id,category,label,employee,reference_date,validity_days,kind
    #[arg(long)]
    pub(crate) items_csv: PathBuf,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Only list items in this bucket (expired, due30, due60, due90)
    #[arg(long, value_parser = parse_bucket)]
    pub(crate) bucket: Option<Bucket>,
    /// Override the first due-soon window in days
    #[arg(long)]
    pub(crate) window30: Option<i64>,
    /// Override the second due-soon window in days
    #[arg(long)]
    pub(crate) window60: Option<i64>,
    /// Override the third due-soon window in days
    #[arg(long)]
    pub(crate) window90: Option<i64>,
    /// Treat items as expired on their due date rather than the day after
    #[arg(long)]
    pub(crate) on_due_date: bool,
    /// Include the item listing in the output
    #[arg(long)]
    pub(crate) list_items: bool,
}

fn parse_bucket(raw: &str) -> Result<Bucket, String> {
    Bucket::from_code(raw).ok_or_else(|| {
        format!("unknown bucket '{raw}', expected one of expired, due30, due60, due90")
    })
}

pub(crate) fn run_alert_report(args: AlertReportArgs) -> Result<(), AppError> {
    let AlertReportArgs {
        items_csv,
        as_of,
        bucket,
        window30,
        window60,
        window90,
        on_due_date,
        list_items,
    } = args;

    let defaults = AlertConfig::load()?;
    let windows = defaults.default_windows.apply(&WindowSettingsUpdate {
        window30,
        window60,
        window90,
    });
    windows.validate()?;
    let boundary = if on_due_date {
        ExpiryBoundary::OnDueDate
    } else {
        defaults.expiry_boundary
    };

    let catalog = ComplianceCatalog::standard();
    let items = CsvItemImporter::from_path(&items_csv, &catalog)?;
    let aggregator = AlertAggregator::new(windows, boundary)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let report = aggregator.aggregate(&items, as_of, bucket);

    render_alert_report(&report, &items_csv, bucket, list_items);
    Ok(())
}

pub(crate) fn render_alert_report(
    report: &AlertReport,
    source: &Path,
    bucket: Option<Bucket>,
    list_items: bool,
) {
    println!("Compliance expiry report");
    println!("Source: {}", source.display());
    println!("Evaluated {}", report.as_of);
    render_windows(&report.windows);

    let summary = &report.summary;
    println!("\nSummary");
    println!("- Expired: {}", summary.expired);
    println!("- Due within window 1: {}", summary.due30);
    println!("- Due within window 2: {}", summary.due60);
    println!("- Due within window 3: {}", summary.due90);

    if list_items {
        match bucket {
            Some(bucket) => println!("\nItems in {}", bucket.code()),
            None => println!("\nItems"),
        }
        if report.items.is_empty() {
            println!("- none");
        }
        for item in &report.items {
            let who = item
                .employee_name
                .as_deref()
                .map(|name| format!(" ({name})"))
                .unwrap_or_default();
            println!(
                "- [{}] {} {}{}: due {} ({} days)",
                item.status_label, item.category_label, item.label, who, item.due_date,
                item.days_to_due
            );
        }
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped items");
        for skipped in &report.skipped {
            println!(
                "- {} ({}): {}",
                skipped.id,
                skipped.category.label(),
                skipped.error
            );
        }
    }
}

fn render_windows(windows: &WindowSettings) {
    println!(
        "Windows: {} / {} / {} days",
        windows.window30, windows.window60, windows.window90
    );
    if !windows.is_ascending() {
        println!("Warning: windows are not strictly ascending");
    }
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let catalog = ComplianceCatalog::standard();

    println!("Occupational exams (ASO)");
    for entry in catalog.exams() {
        println!(
            "- {}: {} days [{}]",
            entry.name, entry.validity_days, entry.reference.norm
        );
    }

    println!("\nTrainings");
    for entry in catalog.trainings() {
        println!(
            "- {} {}: {} days, {}h [{}]",
            entry.code, entry.name, entry.validity_days, entry.workload_hours, entry.reference.norm
        );
    }

    println!("\nDocuments");
    for entry in catalog.documents() {
        println!(
            "- {}: {} days [{}]",
            entry.name, entry.validity_days, entry.reference.norm
        );
    }

    Ok(())
}

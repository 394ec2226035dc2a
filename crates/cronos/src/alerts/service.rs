use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::aggregator::AlertAggregator;
use super::domain::{Bucket, ExpiryBoundary, TenantId};
use super::settings::{SettingsError, SettingsRepository, WindowSettingsStore};
use super::source::{ItemSource, SourceError};
use super::views::{AlertReport, AlertSummary};
use super::windows::{InvalidConfigurationError, WindowSettings, WindowSettingsUpdate};
use crate::config::AlertConfig;

/// Source of "today" when a caller does not pin `as_of`.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Service composing the item source, window settings store, and aggregator.
pub struct ComplianceAlertService<S, R> {
    source: Arc<S>,
    settings: WindowSettingsStore<R>,
    boundary: ExpiryBoundary,
    clock: Arc<dyn Clock>,
}

impl<S, R> ComplianceAlertService<S, R>
where
    S: ItemSource + 'static,
    R: SettingsRepository + 'static,
{
    pub fn new(source: Arc<S>, repository: Arc<R>, config: &AlertConfig) -> Self {
        Self::with_clock(source, repository, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<S>,
        repository: Arc<R>,
        config: &AlertConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            settings: WindowSettingsStore::new(repository, config.default_windows),
            boundary: config.expiry_boundary,
            clock,
        }
    }

    pub fn expiry_boundary(&self) -> ExpiryBoundary {
        self.boundary
    }

    /// Bucket counts for the tenant.
    pub fn summary(
        &self,
        tenant: &TenantId,
        as_of: Option<NaiveDate>,
    ) -> Result<AlertSummary, AlertServiceError> {
        Ok(self.alerts(tenant, None, as_of)?.summary)
    }

    /// Classified items for the tenant, optionally restricted to one bucket.
    pub fn alerts(
        &self,
        tenant: &TenantId,
        filter: Option<Bucket>,
        as_of: Option<NaiveDate>,
    ) -> Result<AlertReport, AlertServiceError> {
        let windows = self.settings.get(tenant)?;
        let aggregator = AlertAggregator::new(windows, self.boundary)?;
        let items = self.source.items_for_tenant(tenant)?;
        let as_of = as_of.unwrap_or_else(|| self.clock.today());

        let report = aggregator.aggregate(&items, as_of, filter);
        if !report.skipped.is_empty() {
            tracing::warn!(
                %tenant,
                skipped = report.skipped.len(),
                "some items could not be classified"
            );
        }
        tracing::debug!(
            %tenant,
            %as_of,
            expired = report.summary.expired,
            due30 = report.summary.due30,
            due60 = report.summary.due60,
            due90 = report.summary.due90,
            "alerts aggregated"
        );

        Ok(report)
    }

    pub fn settings(&self, tenant: &TenantId) -> Result<WindowSettings, AlertServiceError> {
        Ok(self.settings.get(tenant)?)
    }

    pub fn update_settings(
        &self,
        tenant: &TenantId,
        update: WindowSettingsUpdate,
    ) -> Result<WindowSettings, AlertServiceError> {
        Ok(self.settings.update(tenant, update)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AlertServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Configuration(#[from] InvalidConfigurationError),
}

use chrono::NaiveDate;
use cronos::alerts::{
    ItemSource, RepositoryError, SettingsRepository, SourceError, TenantId, TrackableItem,
    WindowSettings,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Tracked items held per tenant until a persistent source exists.
#[derive(Default, Clone)]
pub(crate) struct InMemoryItemSource {
    items: Arc<Mutex<HashMap<TenantId, Vec<TrackableItem>>>>,
}

impl InMemoryItemSource {
    pub(crate) fn replace(&self, tenant: TenantId, items: Vec<TrackableItem>) {
        let mut guard = self.items.lock().expect("item source mutex poisoned");
        guard.insert(tenant, items);
    }
}

impl ItemSource for InMemoryItemSource {
    fn items_for_tenant(&self, tenant: &TenantId) -> Result<Vec<TrackableItem>, SourceError> {
        let guard = self.items.lock().expect("item source mutex poisoned");
        Ok(guard.get(tenant).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySettingsRepository {
    settings: Arc<Mutex<HashMap<TenantId, WindowSettings>>>,
}

impl SettingsRepository for InMemorySettingsRepository {
    fn load(&self, tenant: &TenantId) -> Result<Option<WindowSettings>, RepositoryError> {
        let guard = self.settings.lock().expect("settings mutex poisoned");
        Ok(guard.get(tenant).copied())
    }

    fn save(&self, tenant: &TenantId, settings: WindowSettings) -> Result<(), RepositoryError> {
        let mut guard = self.settings.lock().expect("settings mutex poisoned");
        guard.insert(tenant.clone(), settings);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

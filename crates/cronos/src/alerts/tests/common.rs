use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::alerts::domain::{
    DocumentKind, DocumentRecord, ExamKind, ExamRecord, ItemId, TenantId, TrackableItem,
    TrainingRecord,
};
use crate::alerts::service::{ComplianceAlertService, FixedClock};
use crate::alerts::settings::{RepositoryError, SettingsRepository};
use crate::alerts::source::{ItemSource, SourceError};
use crate::alerts::windows::WindowSettings;
use crate::config::AlertConfig;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

pub(super) fn acme() -> TenantId {
    TenantId("acme".to_string())
}

pub(super) fn globex() -> TenantId {
    TenantId("globex".to_string())
}

/// One item per bucket plus a valid one and an unclassifiable one.
pub(super) fn acme_items() -> Vec<TrackableItem> {
    vec![
        TrackableItem::Exam(ExamRecord {
            id: ItemId("aso-ana".to_string()),
            kind: ExamKind::Periodic,
            title: None,
            employee_name: Some("Ana Souza".to_string()),
            reference_date: Some(today() - Duration::days(367)),
            validity_days: 365,
        }),
        TrackableItem::Training(TrainingRecord {
            id: ItemId("nr35-bruno".to_string()),
            code: "NR-35".to_string(),
            title: "NR-35 Trabalho em Altura".to_string(),
            employee_name: Some("Bruno Reis".to_string()),
            reference_date: Some(today() - Duration::days(710)),
            validity_days: 730,
        }),
        TrackableItem::Document(DocumentRecord {
            id: ItemId("pcmso-2023".to_string()),
            kind: DocumentKind::Pcmso,
            title: "PCMSO 2023".to_string(),
            reference_date: Some(today() - Duration::days(320)),
            validity_days: 365,
        }),
        TrackableItem::Document(DocumentRecord {
            id: ItemId("pgr-matriz".to_string()),
            kind: DocumentKind::Pgr,
            title: "PGR Matriz".to_string(),
            reference_date: Some(today() - Duration::days(655)),
            validity_days: 730,
        }),
        TrackableItem::Exam(ExamRecord {
            id: ItemId("aso-carla".to_string()),
            kind: ExamKind::Admission,
            title: None,
            employee_name: Some("Carla Dias".to_string()),
            reference_date: Some(today() - Duration::days(10)),
            validity_days: 365,
        }),
        TrackableItem::Exam(ExamRecord {
            id: ItemId("aso-missing".to_string()),
            kind: ExamKind::ReturnToWork,
            title: None,
            employee_name: Some("Davi Luz".to_string()),
            reference_date: None,
            validity_days: 365,
        }),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemorySource {
    items: Arc<Mutex<HashMap<TenantId, Vec<TrackableItem>>>>,
}

impl MemorySource {
    pub(super) fn with(tenant: TenantId, items: Vec<TrackableItem>) -> Self {
        let source = Self::default();
        source
            .items
            .lock()
            .expect("source mutex poisoned")
            .insert(tenant, items);
        source
    }
}

impl ItemSource for MemorySource {
    fn items_for_tenant(&self, tenant: &TenantId) -> Result<Vec<TrackableItem>, SourceError> {
        let guard = self.items.lock().expect("source mutex poisoned");
        Ok(guard.get(tenant).cloned().unwrap_or_default())
    }
}

pub(super) struct OfflineSource;

impl ItemSource for OfflineSource {
    fn items_for_tenant(&self, _tenant: &TenantId) -> Result<Vec<TrackableItem>, SourceError> {
        Err(SourceError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySettings {
    settings: Arc<Mutex<HashMap<TenantId, WindowSettings>>>,
}

impl MemorySettings {
    pub(super) fn stored(&self, tenant: &TenantId) -> Option<WindowSettings> {
        self.settings
            .lock()
            .expect("settings mutex poisoned")
            .get(tenant)
            .copied()
    }
}

impl SettingsRepository for MemorySettings {
    fn load(&self, tenant: &TenantId) -> Result<Option<WindowSettings>, RepositoryError> {
        Ok(self.stored(tenant))
    }

    fn save(&self, tenant: &TenantId, settings: WindowSettings) -> Result<(), RepositoryError> {
        self.settings
            .lock()
            .expect("settings mutex poisoned")
            .insert(tenant.clone(), settings);
        Ok(())
    }
}

/// Returns settings that bypassed validation, as a hand-edited row would.
pub(super) struct CorruptSettings;

impl SettingsRepository for CorruptSettings {
    fn load(&self, _tenant: &TenantId) -> Result<Option<WindowSettings>, RepositoryError> {
        Ok(Some(WindowSettings {
            window30: 0,
            window60: 60,
            window90: 90,
        }))
    }

    fn save(&self, _tenant: &TenantId, _settings: WindowSettings) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) fn build_service() -> (
    ComplianceAlertService<MemorySource, MemorySettings>,
    Arc<MemorySettings>,
) {
    let source = Arc::new(MemorySource::with(acme(), acme_items()));
    let settings = Arc::new(MemorySettings::default());
    let service = ComplianceAlertService::with_clock(
        source,
        settings.clone(),
        &AlertConfig::default(),
        Arc::new(FixedClock(today())),
    );
    (service, settings)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

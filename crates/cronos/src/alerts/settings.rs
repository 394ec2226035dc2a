use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::TenantId;
use super::windows::{ValidationError, WindowSettings, WindowSettingsUpdate};

/// Persistence boundary for per-tenant window overrides.
pub trait SettingsRepository: Send + Sync {
    fn load(&self, tenant: &TenantId) -> Result<Option<WindowSettings>, RepositoryError>;
    fn save(&self, tenant: &TenantId, settings: WindowSettings) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("settings repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Resolves tenant overrides over an injected default and serialises
/// updates per tenant.
pub struct WindowSettingsStore<R> {
    repository: Arc<R>,
    defaults: WindowSettings,
    tenant_locks: Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
}

impl<R> WindowSettingsStore<R>
where
    R: SettingsRepository + 'static,
{
    pub fn new(repository: Arc<R>, defaults: WindowSettings) -> Self {
        Self {
            repository,
            defaults,
            tenant_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, tenant: &TenantId) -> Result<WindowSettings, SettingsError> {
        let stored = self.repository.load(tenant)?;
        Ok(stored.unwrap_or(self.defaults))
    }

    /// Merge `update` over the current settings, validate, and persist.
    ///
    /// The read-modify-write runs under the tenant's lock so concurrent
    /// partial updates cannot drop each other's fields. A rejected update
    /// writes nothing.
    pub fn update(
        &self,
        tenant: &TenantId,
        update: WindowSettingsUpdate,
    ) -> Result<WindowSettings, SettingsError> {
        let lock = self.tenant_lock(tenant);
        let result = {
            let _guard = lock.lock().expect("tenant settings lock poisoned");
            self.apply_update(tenant, update)
        };
        self.release_tenant_lock(tenant, lock);
        result
    }

    fn apply_update(
        &self,
        tenant: &TenantId,
        update: WindowSettingsUpdate,
    ) -> Result<WindowSettings, SettingsError> {
        let current = self.get(tenant)?;
        let next = current.apply(&update);
        next.validate()?;

        if !next.is_ascending() {
            tracing::warn!(
                %tenant,
                window30 = next.window30,
                window60 = next.window60,
                window90 = next.window90,
                "alert windows are not strictly ascending"
            );
        }

        self.repository.save(tenant, next)?;
        tracing::info!(%tenant, ?current, updated = ?next, "alert windows updated");
        Ok(next)
    }

    fn tenant_lock(&self, tenant: &TenantId) -> Arc<Mutex<()>> {
        let mut locks = self.tenant_locks.lock().expect("tenant lock map poisoned");
        locks.entry(tenant.clone()).or_default().clone()
    }

    /// Drops the tenant's entry once no other update holds or awaits it.
    /// Handles are only cloned under the map lock, so the count is stable here.
    fn release_tenant_lock(&self, tenant: &TenantId, lock: Arc<Mutex<()>>) {
        let mut locks = self.tenant_locks.lock().expect("tenant lock map poisoned");
        // one handle in the map, one held here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(tenant);
        }
    }
}

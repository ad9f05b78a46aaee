//! Client-side tenant memory for portal API calls.
//!
//! The portal remembers the tenant the API last reported and sends it back on
//! later API calls. [`TenantState`] holds that value and writes every change
//! through a [`TenantStore`], the equivalent of browser local storage.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

pub const TENANT_HEADER: HeaderName = HeaderName::from_static("x-tenant-id");

/// Unprefixed variant some API responses use instead of [`TENANT_HEADER`].
pub const TENANT_HEADER_BARE: HeaderName = HeaderName::from_static("tenant-id");

/// Persistence for the remembered tenant id.
pub trait TenantStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, tenant: &str);
    fn remove(&mut self);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<String>,
}

impl TenantStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, tenant: &str) {
        self.value = Some(tenant.to_owned());
    }

    fn remove(&mut self) {
        self.value = None;
    }
}

pub struct TenantState<S> {
    store: S,
    current: Option<String>,
    api_origin: Option<Url>,
}

impl<S: TenantStore> TenantState<S> {
    /// Restores the remembered tenant from `store`. Calls to `api_origin`
    /// always carry the tenant header; other calls only when their path
    /// starts with `/api`.
    pub fn new(store: S, api_origin: Option<Url>) -> Self {
        let current = store.load().filter(|t| !t.is_empty());
        Self {
            store,
            current,
            api_origin,
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Remembers `tenant`. A blank id clears the state instead.
    pub fn set(&mut self, tenant: &str) {
        let tenant = tenant.trim();
        if tenant.is_empty() {
            self.clear();
            return;
        }
        self.store.save(tenant);
        self.current = Some(tenant.to_owned());
    }

    pub fn clear(&mut self) {
        self.store.remove();
        self.current = None;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn applies_to(&self, target: &Url) -> bool {
        let same_origin = self
            .api_origin
            .as_ref()
            .is_some_and(|api| api.origin() == target.origin());
        same_origin || target.path().starts_with("/api")
    }

    /// Header to attach to an outbound call, if any.
    pub fn header_for(&self, target: &Url) -> Option<(HeaderName, HeaderValue)> {
        let tenant = self.current.as_deref()?;
        if !self.applies_to(target) {
            return None;
        }
        let value = HeaderValue::from_str(tenant).ok()?;
        Some((TENANT_HEADER, value))
    }

    /// Picks up a tenant id announced by a response.
    pub fn observe(&mut self, headers: &HeaderMap) {
        let Some(tenant) = headers
            .get(&TENANT_HEADER)
            .or_else(|| headers.get(&TENANT_HEADER_BARE))
            .and_then(|v| v.to_str().ok())
        else {
            return;
        };
        if self.current.as_deref() != Some(tenant.trim()) {
            self.set(tenant);
        }
    }
}

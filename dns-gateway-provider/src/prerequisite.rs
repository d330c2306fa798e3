//! Lazily resolved, instance-scoped vendor identifiers.
//!
//! Some vendor APIs need an identifier before any zone call can be made
//! (DNSimple's account id, Cloudflare's zone id). These cells memoize it for
//! the lifetime of one adapter instance:
//!
//! - a value taken from configuration is used as-is, no lookup is ever issued;
//! - otherwise the first caller runs the lookup while concurrent first callers
//!   wait for it and receive the same value (single-flight);
//! - a failed lookup leaves the cell empty, so a later call looks up again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::error::Result;

/// A single memoized identifier.
#[derive(Debug, Default)]
pub(crate) struct PrerequisiteCell {
    cell: OnceCell<String>,
}

impl PrerequisiteCell {
    /// Creates a cell, already resolved when `preset` is a non-blank value.
    pub fn new(preset: Option<String>) -> Self {
        let preset = preset.filter(|v| !v.trim().is_empty());
        Self {
            cell: OnceCell::new_with(preset),
        }
    }

    /// The cached value, if resolved.
    pub fn get(&self) -> Option<&str> {
        self.cell.get().map(String::as_str)
    }

    /// Stores `value` unless the cell is already resolved. Returns whether it was stored.
    pub fn seed(&self, value: String) -> bool {
        self.cell.set(value).is_ok()
    }

    /// Returns the cached value or runs `resolve` exactly once across concurrent callers.
    pub async fn get_or_resolve<F, Fut>(&self, resolve: F) -> Result<&str>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        self.cell
            .get_or_try_init(resolve)
            .await
            .map(String::as_str)
    }
}

/// One [`PrerequisiteCell`] per key (e.g. per domain).
#[derive(Debug, Default)]
pub(crate) struct KeyedPrerequisites {
    cells: Mutex<HashMap<String, Arc<PrerequisiteCell>>>,
}

impl KeyedPrerequisites {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &str) -> Arc<PrerequisiteCell> {
        // The lock only guards the map; lookups run outside of it.
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key.to_string()).or_default())
    }

    /// Returns the cached value for `key` or resolves it single-flight.
    pub async fn get_or_resolve<F, Fut>(&self, key: &str, resolve: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let cell = self.cell(key);
        let value = cell.get_or_resolve(resolve).await?;
        Ok(value.to_string())
    }
}

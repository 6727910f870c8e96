//! Shared, lock-guarded flat configuration view.
//!
//! Responsibilities:
//! - Hold the current `FlatMap` behind a reader/writer lock.
//! - Replace it on load and expose snapshot reads.
//! - Apply update-only mutations, singly or as an all-or-nothing batch.
//! - Export the nested document for an encoder.
//!
//! Does NOT handle:
//! - File or environment I/O (see `manager.rs` and `env.rs`).
//! - Format selection or encoding (see `format/`).
//!
//! Invariants:
//! - Every value held is a scalar.
//! - Updates never insert keys; a batch with any unknown key changes nothing.
//! - Nothing slower than a map operation runs while the lock is held: flattening
//!   happens before the write lock is taken and unflattening after the read lock
//!   is released.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ConfigError;
use crate::flatten::{flatten, unflatten};
use crate::value::{FlatMap, NestedValue, Scalar};

/// Thread-safe holder of the flat configuration view.
///
/// Share it behind an `Arc` when several threads need it.
#[derive(Debug, Default)]
pub struct Store {
    data: RwLock<FlatMap>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `flat`.
    pub fn from_flat(flat: FlatMap) -> Self {
        Self {
            data: RwLock::new(flat),
        }
    }

    // Writers only ever swap or assign whole values, so a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, FlatMap> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FlatMap> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the held view with the flattened form of `nested`.
    pub fn load(&self, nested: &NestedValue) {
        let flat = flatten(nested);
        self.replace(flat);
    }

    /// Replaces the held view with an already-flat map.
    pub fn replace(&self, flat: FlatMap) {
        let count = flat.len();
        *self.write() = flat;
        tracing::trace!(keys = count, "Store contents replaced");
    }

    /// Returns a copy of the current view.
    pub fn get(&self) -> FlatMap {
        self.read().clone()
    }

    pub fn get_key(&self, key: &str) -> Option<Scalar> {
        self.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Returns every key, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Replaces the value of an existing key.
    ///
    /// # Errors
    /// Returns `ConfigError::KeyNotFound` if `key` is not loaded; the store is unchanged.
    pub fn update_one(&self, key: &str, value: impl Into<Scalar>) -> Result<(), ConfigError> {
        let mut data = self.write();
        match data.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(ConfigError::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Replaces the values of several existing keys at once.
    ///
    /// Every key is checked before anything is written.
    ///
    /// # Errors
    /// Returns `ConfigError::KeyNotFound` naming the first unknown key in sorted
    /// order; no key is modified in that case.
    pub fn update_many(&self, updates: FlatMap) -> Result<(), ConfigError> {
        let mut data = self.write();
        if let Some(missing) = updates.keys().find(|key| !data.contains_key(*key)) {
            return Err(ConfigError::KeyNotFound {
                key: missing.clone(),
            });
        }
        for (key, value) in updates {
            data.insert(key, value);
        }
        Ok(())
    }

    /// Rebuilds the nested document from a snapshot of the current view.
    ///
    /// # Errors
    /// Propagates `unflatten` errors (`PathConflict`, `EmptySegment`), which can
    /// only occur if the view was installed through `replace` with conflicting keys.
    pub fn export(&self) -> Result<NestedValue, ConfigError> {
        let snapshot = self.get();
        unflatten(&snapshot)
    }
}

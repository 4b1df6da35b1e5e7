//! The value store: fully-qualified key → live value cell.
//!
//! Cells are created lazily by [`ValueStore::ensure`] the first time a
//! declaration needs them; re-declarations never overwrite a live value.
//! `get`/`set` are pure data operations and never trigger rendering. The
//! store itself is not synchronized — the session wraps it in a mutex, which
//! is also what makes concurrent `ensure` calls for the same key resolve to
//! one cell.

use std::collections::HashMap;

use log::warn;

use crate::error::{Error, Result};
use crate::value::cell::Value;

/// Mapping from fully-qualified path key to its value cell.
///
/// A revision counter is bumped on every successful write so a rendering
/// surface can cheaply detect that displayed values went stale.
#[derive(Debug, Default)]
pub struct ValueStore {
    cells: HashMap<String, Value>,
    revision: u64,
}

impl ValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cell for `key`, creating and seeding it if absent.
    ///
    /// An existing cell is returned untouched — the passed seed is ignored,
    /// so only the very first declaration establishes the initial value.
    pub fn ensure(&mut self, key: &str, seed: Value) -> &Value {
        self.cells.entry(key.to_owned()).or_insert(seed)
    }

    /// Read the current value of `key`.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.cells
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_owned()))
    }

    /// Overwrite the value of `key`, keeping its declared variant.
    ///
    /// Fails with [`Error::NotFound`] for unknown keys and
    /// [`Error::TypeMismatch`] when the new value carries a different
    /// variant than the cell was declared with.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        match self.cells.get_mut(key) {
            Some(cell) => {
                if !cell.same_kind(&value) {
                    return Err(Error::TypeMismatch {
                        expected: cell.type_name(),
                        found: value.type_name(),
                    });
                }
                *cell = value;
                self.revision = self.revision.wrapping_add(1);
                Ok(())
            }
            None => {
                warn!("set on unknown path {key:?}");
                Err(Error::NotFound(key.to_owned()))
            }
        }
    }

    /// Whether a cell exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the store holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Monotonic write counter, bumped on every successful `set`.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

/// A lazily initialized value whose initializer may fail and be retried.
///
/// The cell follows the same gate rules as [`Once`](crate::Once): an
/// initializer returning `Err` leaves the cell empty for the next caller,
/// and the first `Ok` value is stored for the life of the cell. Every
/// caller after that shares the same `Arc`.
pub struct TryOnceCell<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> TryOnceCell<T> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        TryOnceCell {
            slot: Mutex::new(None),
        }
    }

    /// Returns the stored value without initializing.
    ///
    /// Blocks while an initializer is running. Calling it from inside an
    /// initializer of the same cell deadlocks.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot().as_ref().map(Arc::clone)
    }

    /// Blocks like [`get`](TryOnceCell::get).
    pub fn is_initialized(&self) -> bool {
        self.slot().is_some()
    }

    /// Returns the stored value, running `init` first if the cell is empty.
    ///
    /// `init` runs while the cell is locked, so concurrent callers wait for
    /// it and then either get the stored value or make their own attempt.
    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = self.slot();
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }

        match init() {
            Ok(value) => {
                let value = Arc::new(value);
                *slot = Some(Arc::clone(&value));
                tracing::debug!("once cell initialized");
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(
                    error_type = std::any::type_name::<E>(),
                    "once cell initializer failed, cell left empty"
                );
                Err(e)
            }
        }
    }

    /// Returns the stored value, running `init` first if the cell is empty.
    ///
    /// Unlike [`get_or_try_init`](TryOnceCell::get_or_try_init), the first
    /// `init` to run always fills the cell.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let mut slot = self.slot();
        match slot.as_ref() {
            Some(value) => Arc::clone(value),
            None => {
                let value = Arc::new(init());
                *slot = Some(Arc::clone(&value));
                tracing::debug!("once cell initialized");
                value
            }
        }
    }

    /// Consumes the cell, returning the stored value if any.
    ///
    /// A panicked initializer never stores anything, so a cell whose only
    /// attempts panicked yields `None`.
    pub fn into_inner(self) -> Option<Arc<T>> {
        self.slot
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.slot.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("once cell initializer panicked on a previous attempt, cell left empty");
            self.slot.clear_poison();
            poisoned.into_inner()
        })
    }
}

impl<T> Default for TryOnceCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TryOnceCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("TryOnceCell");
        match self.slot.try_lock() {
            Ok(slot) => d.field("value", &*slot),
            Err(TryLockError::Poisoned(poisoned)) => d.field("value", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => d.field("value", &format_args!("<locked>")),
        };
        d.finish()
    }
}

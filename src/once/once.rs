use std::fmt;
use std::sync::{Mutex, MutexGuard, TryLockError};

use super::OnceState;

/// A run-once gate whose action may fail and be retried.
///
/// `Once` behaves like [`std::sync::Once`] for [`call_once`](Once::call_once),
/// and adds [`try_call_once`](Once::try_call_once): an action returning
/// `Err` leaves the gate open so a later caller can attempt it again. The
/// gate closes after the first `call_once`, or the first `try_call_once`
/// whose action returns `Ok`, and stays closed.
///
/// The gate check, the action and the transition all run under one mutex,
/// so concurrent callers are serialized and never run two actions at once.
pub struct Once {
    closed: Mutex<bool>,
}

impl Once {
    /// Creates an open gate.
    pub const fn new() -> Self {
        Once {
            closed: Mutex::new(false),
        }
    }

    /// Runs `action` if the gate is open, then closes the gate.
    ///
    /// Does nothing once the gate is closed.
    pub fn call_once<F>(&self, action: F)
    where
        F: FnOnce(),
    {
        let mut closed = self.gate();
        if *closed {
            tracing::trace!("once gate already closed, skipping action");
            return;
        }

        action();
        *closed = true;
        tracing::debug!("once gate closed by unconditional action");
    }

    /// Runs `action` if the gate is open and closes the gate only if it
    /// returns `Ok`.
    ///
    /// Returns `Ok(())` without running `action` when the gate is already
    /// closed. An `Err` from `action` is handed back unchanged and is not
    /// kept; the gate stays open for the next attempt.
    pub fn try_call_once<F, E>(&self, action: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        let mut closed = self.gate();
        if *closed {
            tracing::trace!("once gate already closed, skipping attempt");
            return Ok(());
        }

        match action() {
            Ok(()) => {
                *closed = true;
                tracing::debug!("once gate closed by successful attempt");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(
                    error_type = std::any::type_name::<E>(),
                    "once attempt failed, gate left open"
                );
                Err(e)
            }
        }
    }

    /// Returns `true` once an action has closed the gate.
    ///
    /// Blocks while another caller is running an action. Calling it from
    /// inside an action running on the same `Once` deadlocks.
    pub fn is_completed(&self) -> bool {
        *self.gate()
    }

    /// Same as [`is_completed`](Once::is_completed), as a [`OnceState`].
    pub fn state(&self) -> OnceState {
        OnceState::from_closed(self.is_completed())
    }

    // A panicking action never reaches the transition, so the flag under a
    // poisoned mutex is still accurate.
    fn gate(&self) -> MutexGuard<'_, bool> {
        self.closed.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("once action panicked on a previous attempt, gate left open");
            self.closed.clear_poison();
            poisoned.into_inner()
        })
    }
}

impl Default for Once {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Once {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Once");
        match self.closed.try_lock() {
            Ok(closed) => d.field("state", &OnceState::from_closed(*closed)),
            Err(TryLockError::Poisoned(poisoned)) => {
                d.field("state", &OnceState::from_closed(*poisoned.into_inner()))
            }
            Err(TryLockError::WouldBlock) => d.field("state", &format_args!("<locked>")),
        };
        d.finish()
    }
}

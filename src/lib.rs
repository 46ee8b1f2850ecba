//! Run-once gates for fallible actions.
//!
//! [`Once`] closes after the first [`call_once`](Once::call_once) or the first
//! successful [`try_call_once`](Once::try_call_once). Failed attempts leave it
//! open, so initialization that can fail is simply tried again on next use.
//!
//! ```
//! use retry_once::Once;
//!
//! let once = Once::new();
//! for attempt in 1..=3 {
//!     let result = once.try_call_once(|| {
//!         if attempt < 3 {
//!             Err(format!("attempt {} failed", attempt))
//!         } else {
//!             Ok(())
//!         }
//!     });
//!     assert_eq!(result.is_ok(), attempt == 3);
//! }
//! assert!(once.is_completed());
//! ```
//!
//! [`TryOnceCell`] applies the same rules to a lazily built value.

mod cell;
mod once;

pub use cell::TryOnceCell;
pub use once::{Once, OnceState};

//! Basic synchronization primitives.
//!
//! Every cache in the workspace is shared between threads, so the
//! `parking_lot` locks are used unconditionally. Low-level crates depend on
//! this module instead of naming the lock implementation directly.
pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use std::sync::{
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    Arc,
};

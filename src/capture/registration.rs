// --- HOOK REGISTRATION ---
// Single registered-instance slot the hook callback reads, and the start-up
// handshake with the hook pump thread.

use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, AtomicU32, Ordering};

/// Holds at most one boxed value reachable from a context-free OS callback.
pub struct TargetSlot<T> {
    ptr: AtomicPtr<T>,
}

impl<T> TargetSlot<T> {
    pub const fn new() -> Self {
        TargetSlot {
            ptr: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Publishes `value`. Hands it back if another value is already registered.
    pub fn register(&self, value: Box<T>) -> Result<(), Box<T>> {
        let raw = Box::into_raw(value);
        match self
            .ptr
            .compare_exchange(ptr::null_mut(), raw, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(()),
            // SAFETY: `raw` was never published.
            Err(_) => Err(unsafe { Box::from_raw(raw) }),
        }
    }

    pub fn is_registered(&self) -> bool {
        !self.ptr.load(Ordering::Acquire).is_null()
    }

    /// # Safety
    /// The returned reference must not outlive the registration: `clear` may
    /// only run once no reader can still be inside a callback.
    pub unsafe fn get(&self) -> Option<&T> {
        unsafe { self.ptr.load(Ordering::Acquire).as_ref() }
    }

    /// Unpublishes and drops the registered value. Returns whether one was
    /// registered, so a second call is a no-op.
    pub fn clear(&self) -> bool {
        let old = self.ptr.swap(ptr::null_mut(), Ordering::AcqRel);
        if old.is_null() {
            return false;
        }
        // SAFETY: produced by `Box::into_raw` in `register` and unpublished above.
        drop(unsafe { Box::from_raw(old) });
        true
    }
}

impl<T> Default for TargetSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared between `MouseHook::install` and its pump thread so that giving up
/// on a slow install still tears the hook down once it lands.
#[derive(Debug, Default)]
pub struct InstallHandshake {
    thread_id: AtomicU32,
    abandoned: AtomicBool,
}

impl InstallHandshake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the pump thread once its message queue exists, before the
    /// hook is requested.
    pub fn publish_thread(&self, thread_id: u32) {
        self.thread_id.store(thread_id, Ordering::SeqCst);
    }

    /// Marks the install as given up. Returns the pump thread id if it was
    /// already published; otherwise the thread will see the flag itself after
    /// its hook call returns.
    pub fn abandon(&self) -> Option<u32> {
        self.abandoned.store(true, Ordering::SeqCst);
        match self.thread_id.load(Ordering::SeqCst) {
            0 => None,
            id => Some(id),
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

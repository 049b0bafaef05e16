//! Shared, thread-safe observable value with replay-on-subscribe.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    /// Version current when the subscriber registered; older queued changes are skipped.
    since: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

struct Inner<T> {
    value: T,
    version: u64,
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
    /// Changes applied but not yet delivered, tagged with their version.
    pending: VecDeque<(u64, T)>,
    notifying: bool,
}

/// Holds one value of `T` and notifies subscribers after every change.
///
/// Cloning a `StateContainer` creates a new handle to the **same** value.
///
/// Writes are serialized by an internal lock; callbacks always run with the
/// lock released. A write issued while a fan-out is running (from a callback
/// or another thread) takes effect immediately and its notification is queued
/// behind the current one, so every subscriber sees every change once, in the
/// order the changes were applied.
pub struct StateContainer<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for StateContainer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StateContainer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("StateContainer")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + Send + 'static> StateContainer<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `callback`, invoke it once with the current value, and return
    /// the handle that unregisters it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let active = Arc::new(AtomicBool::new(true));
        let (id, current) = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            let since = inner.version;
            inner.subscribers.push(Subscriber {
                id,
                since,
                active: Arc::clone(&active),
                callback: Arc::clone(&callback),
            });
            (id, inner.value.clone())
        };
        callback(&current);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            active,
            detach: Some(Box::new(move || {
                if let Some(strong) = weak.upgrade() {
                    let mut inner = strong.lock().unwrap_or_else(PoisonError::into_inner);
                    inner.subscribers.retain(|s| s.id != id);
                }
            })),
        }
    }

    /// Replace the value wholesale and notify.
    pub fn set(&self, value: T) {
        let inner = self.lock();
        self.commit(inner, value);
    }

    /// Replace the value with `f(current)` and notify.
    ///
    /// `f` runs under the container's lock: it must not read or write this
    /// same container.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let inner = self.lock();
        let next = f(&inner.value);
        self.commit(inner, next);
    }

    /// The value current at call time. Later changes are not observed.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock().value)
    }

    /// Number of changes applied since creation.
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn commit<'a>(&'a self, mut inner: MutexGuard<'a, Inner<T>>, value: T) {
        inner.version += 1;
        let version = inner.version;
        inner.pending.push_back((version, value.clone()));
        inner.value = value;
        if inner.notifying {
            // The running fan-out drains the queue.
            return;
        }
        inner.notifying = true;
        let mut reset = FanOutReset {
            inner: &self.inner,
            armed: true,
        };
        loop {
            let Some((version, next)) = inner.pending.pop_front() else {
                inner.notifying = false;
                reset.armed = false;
                return;
            };
            let targets: Vec<(Arc<AtomicBool>, Callback<T>)> = inner
                .subscribers
                .iter()
                .filter(|s| s.since < version)
                .map(|s| (Arc::clone(&s.active), Arc::clone(&s.callback)))
                .collect();
            drop(inner);
            for (active, callback) in targets {
                if active.load(Ordering::Acquire) {
                    callback(&next);
                }
            }
            inner = self.lock();
        }
    }
}

/// Ends a fan-out that unwound out of a subscriber callback, so later writes
/// start a fresh one. Undelivered changes of the aborted fan-out are dropped.
struct FanOutReset<'a, T> {
    inner: &'a Mutex<Inner<T>>,
    armed: bool,
}

impl<T> Drop for FanOutReset<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Only reached on unwind, where the callback ran with the lock released.
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.notifying = false;
        inner.pending.clear();
    }
}

/// Unregister capability returned by [`StateContainer::subscribe`].
///
/// Unsubscribes when dropped; keep it alive for as long as notifications are
/// wanted, or call [`Subscription::detach`] to keep the callback registered
/// for the container's lifetime.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    active: Arc<AtomicBool>,
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Stop notifications now. Nothing is delivered after this returns, even
    /// from a fan-out already in progress.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Leave the callback registered for good.
    pub fn detach(mut self) {
        self.detach = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn release(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detach.is_some() {
            self.release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

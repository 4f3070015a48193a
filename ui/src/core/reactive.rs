//! Minimal single-threaded reactive primitives.
//!
//! A [`Source`] holds the latest value of one upstream stream. Subscribers are
//! replayed the current value immediately (if any) and then every later
//! emission, in order. Dropping the returned [`Subscription`] detaches the
//! listener, so tying the handle to a component's lifetime releases the
//! upstream on unmount.
//!
//! ```ignore
//! let screen = Source::with_value(ScreenSize::Medium);
//! let _sub = screen.subscribe(|size| tracing::debug!(?size, "screen changed"));
//! screen.set(ScreenSize::Large);
//! ```
//!
//! Everything here is `!Send` on purpose: the UI runs on one event loop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<Option<T>>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_id: Cell<u64>,
}

/// Latest-value cell with publish/subscribe semantics.
pub struct Source<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("value", &self.inner.value.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Default for Source<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Source<T> {
    /// A cold source: subscribers hear nothing until the first `set`.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn with_value(value: T) -> Self {
        let source = Self::new();
        source.inner.value.replace(Some(value));
        source
    }

    pub fn get(&self) -> Option<T> {
        self.inner.value.borrow().clone()
    }

    pub fn has_value(&self) -> bool {
        self.inner.value.borrow().is_some()
    }

    /// Store `value` and notify every listener.
    pub fn set(&self, value: T) {
        self.inner.value.replace(Some(value.clone()));
        self.emit(&value);
    }

    /// Mutate the current value in place and emit the result. No-op while cold.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let next = {
            let mut slot = self.inner.value.borrow_mut();
            match slot.as_mut() {
                Some(value) => {
                    f(value);
                    value.clone()
                }
                None => return,
            }
        };
        self.emit(&next);
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let listener: Listener<T> = Rc::new(listener);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, listener.clone()));

        let current = self.get();
        if let Some(value) = current {
            listener(&value);
        }

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Derive a source whose value is `f` applied to each emission of `self`.
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Mapped<U> {
        let output = Source::new();
        let sink = output.clone();
        let subscription = self.subscribe(move |value| sink.set(f(value)));
        Mapped {
            output,
            _subscription: subscription,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn emit(&self, value: &T) {
        // Snapshot so listeners may subscribe/unsubscribe while being notified.
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

/// Handle returned by [`Source::subscribe`]; unsubscribes on drop.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// A set of subscriptions released together.
#[derive(Debug, Default)]
pub struct Subscriptions {
    held: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.held.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// A derived source plus the subscription that feeds it.
pub struct Mapped<U> {
    output: Source<U>,
    _subscription: Subscription,
}

impl<U: Clone + 'static> Mapped<U> {
    pub fn get(&self) -> Option<U> {
        self.output.get()
    }

    pub fn source(&self) -> &Source<U> {
        &self.output
    }

    pub fn subscribe(&self, listener: impl Fn(&U) + 'static) -> Subscription {
        self.output.subscribe(listener)
    }
}

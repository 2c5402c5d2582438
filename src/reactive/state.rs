//! Observable state cell
//!
//! A `State<T>` is a shared, single-threaded value that notifies subscribers
//! whenever it changes. Subscribing delivers one `Change::Init` immediately,
//! then `Change::Update` after every `set`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;

/// Kind of notification delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// First observation, sent once at subscribe time
    Init,
    /// The value was replaced
    Update,
}

type Subscriber = Box<dyn FnMut(Change) -> Result<()>>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber>>,
    notifying: Cell<bool>,
    pending: Cell<bool>,
}

/// Shared observable value
pub struct State<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Non-owning handle, used by subscribers that live inside the state itself
pub struct WeakState<T> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for WeakState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakState<T> {
    pub fn upgrade(&self) -> Option<State<T>> {
        self.inner.upgrade().map(|inner| State { inner })
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&*self.inner.value.borrow()).finish()
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                notifying: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value and notify every subscriber.
    ///
    /// All subscribers run even if one fails; the first error is returned.
    /// The new value stays in place regardless.
    pub fn set(&self, value: T) -> Result<()> {
        *self.inner.value.borrow_mut() = value;
        self.notify(Change::Update)
    }

    /// Mutate in place, then notify as `set` does
    pub fn update(&self, f: impl FnOnce(&mut T)) -> Result<()> {
        f(&mut self.inner.value.borrow_mut());
        self.notify(Change::Update)
    }

    /// Register a change listener. It receives `Change::Init` right away.
    pub fn subscribe(&self, mut f: impl FnMut(Change) -> Result<()> + 'static) -> Result<()> {
        let first = f(Change::Init);
        self.inner.subscribers.borrow_mut().push(Box::new(f));
        first
    }

    pub fn downgrade(&self) -> WeakState<T> {
        WeakState {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn notify(&self, change: Change) -> Result<()> {
        // Re-entrant sets from inside a subscriber schedule another round
        // instead of nesting.
        if self.inner.notifying.replace(true) {
            self.inner.pending.set(true);
            return Ok(());
        }

        let mut active = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
        let mut first_err = None;
        loop {
            for sub in active.iter_mut() {
                if let Err(e) = sub(change) {
                    first_err.get_or_insert(e);
                }
            }
            if !self.inner.pending.replace(false) {
                break;
            }
        }

        // Keep anything subscribed during the round
        let mut subs = self.inner.subscribers.borrow_mut();
        active.append(&mut subs);
        *subs = active;
        drop(subs);

        self.inner.notifying.set(false);
        first_err.map_or(Ok(()), Err)
    }
}

impl<T: Clone + Default + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

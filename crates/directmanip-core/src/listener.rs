//! State-change listeners and their copy-on-write registry.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receives every state change of a recognizer of type `R`.
///
/// Implementations should query the provided recognizer for its current state
/// and values. Closures taking `&R` implement this trait.
pub trait StateChangeListener<R: ?Sized> {
    /// Called synchronously after the recognizer's state changed.
    fn on_state_changed(&self, recognizer: &R);
}

impl<R: ?Sized, F: Fn(&R)> StateChangeListener<R> for F {
    fn on_state_changed(&self, recognizer: &R) {
        self(recognizer);
    }
}

/// Shared listener handle. Identity (not equality) decides duplicates.
pub type Listener<R> = Rc<dyn StateChangeListener<R>>;

/// Wrap a closure into a [`Listener`] handle.
pub fn listener<R, F>(f: F) -> Listener<R>
where
    R: 'static,
    F: Fn(&R) + 'static,
{
    Rc::new(f)
}

/// Ordered, duplicate-free set of listeners.
///
/// Storage is copy-on-write: dispatch iterates a snapshot, so listeners may
/// add or remove listeners (on this or any registry) from inside a callback.
/// Changes apply from the next dispatch on.
pub struct ListenerRegistry<R: ?Sized> {
    listeners: RefCell<Rc<Vec<Listener<R>>>>,
}

impl<R: ?Sized> ListenerRegistry<R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Rc::new(Vec::new())),
        }
    }

    /// Append a listener. Returns `false` if it was already registered.
    pub fn add(&self, listener: Listener<R>) -> bool {
        let mut guard = self.listeners.borrow_mut();
        if guard.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            return false;
        }
        Rc::make_mut(&mut guard).push(listener);
        true
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&self, listener: &Listener<R>) -> bool {
        let mut guard = self.listeners.borrow_mut();
        let Some(pos) = guard.iter().position(|l| Rc::ptr_eq(l, listener)) else {
            return false;
        };
        Rc::make_mut(&mut guard).remove(pos);
        true
    }

    /// Check if a listener is registered.
    pub fn contains(&self, listener: &Listener<R>) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|l| Rc::ptr_eq(l, listener))
    }

    /// Get the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Check if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take a snapshot of the current listeners, in registration order.
    pub fn snapshot(&self) -> Rc<Vec<Listener<R>>> {
        Rc::clone(&self.listeners.borrow())
    }

    /// Invoke every listener of the current snapshot with `recognizer`.
    pub fn dispatch(&self, recognizer: &R) {
        let snapshot = self.snapshot();
        for listener in snapshot.iter() {
            listener.on_state_changed(recognizer);
        }
    }
}

impl<R: ?Sized> Default for ListenerRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> fmt::Debug for ListenerRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listener_count", &self.len())
            .finish()
    }
}

// Typed action bus.
//
// Every action is offered to an ordered chain of middleware. Each middleware
// sees the action, may start side effects, and passes it on by calling
// `next.run(action)`. After the last middleware the reducer applies the
// action and listeners are told what changed.
//
// Middleware that needs to dispatch later (from a timer) holds a `Weak<Store>`
// so the store can own its middleware without a reference cycle.

pub mod action;
pub mod reducer;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use action::Action;
use reducer::TakeShotState;

/// One link in the dispatch chain.
pub trait Middleware: Send + Sync {
    /// Handle `action`. Call `next.run(..)` to let it continue; not calling
    /// it stops the action here (nothing in this crate does that).
    fn handle(&self, store: &Arc<Store>, action: Action, next: Next<'_>);
}

/// Handle to the rest of the chain after the current middleware.
pub struct Next<'a> {
    store: &'a Arc<Store>,
    index: usize,
}

impl Next<'_> {
    pub fn run(self, action: Action) {
        self.store.dispatch_from(self.index, action);
    }
}

/// Called after every reduction with the action, the state before it and
/// the state after it.
pub type Listener = Arc<dyn Fn(&Action, &TakeShotState, &TakeShotState) + Send + Sync>;

pub struct Store {
    state: Mutex<TakeShotState>,
    middleware: Vec<Arc<dyn Middleware>>,
    listeners: Mutex<Vec<Listener>>,
}

impl Store {
    pub fn new(middleware: Vec<Arc<dyn Middleware>>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(TakeShotState::default()),
            middleware,
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Send an action through the whole chain.
    pub fn dispatch(self: &Arc<Self>, action: Action) {
        trace!(action = action.kind(), "Dispatch");
        self.dispatch_from(0, action);
    }

    /// Current state snapshot.
    pub fn state(&self) -> TakeShotState {
        *lock(&self.state)
    }

    pub fn subscribe(&self, listener: Listener) {
        lock(&self.listeners).push(listener);
    }

    fn dispatch_from(self: &Arc<Self>, index: usize, action: Action) {
        match self.middleware.get(index) {
            Some(middleware) => middleware.handle(
                self,
                action,
                Next {
                    store: self,
                    index: index + 1,
                },
            ),
            None => self.apply(action),
        }
    }

    fn apply(&self, action: Action) {
        let (before, after) = {
            let mut state = lock(&self.state);
            let before = *state;
            *state = reducer::reduce(before, &action);
            (before, *state)
        };

        // Snapshot so a listener can dispatch without deadlocking on the list
        let listeners: Vec<Listener> = lock(&self.listeners).clone();
        for listener in listeners {
            listener(&action, &before, &after);
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

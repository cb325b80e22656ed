//! Explicit state containers for the dashboard.
//!
//! Each domain slice lives in a `Store<S>` owned by the workspace. Mutations
//! go through `set`/`set_if`, which update the slice first and then notify
//! subscribers with the new state. Stores that survive a restart implement
//! [`Persist`] so a subscriber can project them into a snapshot DTO.

pub mod attendance;
pub mod criteria;
pub mod dashboard;
pub mod teachers;
pub mod ui;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::slots::SlotStorage;

pub type Listener<S> = Box<dyn FnMut(&S)>;

pub struct Store<S> {
    name: &'static str,
    state: S,
    listeners: Vec<Listener<S>>,
}

impl<S> Store<S> {
    pub fn new(name: &'static str, state: S) -> Self {
        Self {
            name,
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Listeners live as long as the store.
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies `f` and notifies unconditionally.
    pub fn set<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let out = f(&mut self.state);
        self.notify();
        out
    }

    /// Applies `f`; subscribers only hear about it when `f` reports a change.
    pub fn set_if<R>(&mut self, f: impl FnOnce(&mut S) -> Option<R>) -> Option<R> {
        let out = f(&mut self.state);
        if out.is_some() {
            self.notify();
        }
        out
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

/// A state slice with a named, durable subset of fields.
pub trait Persist {
    const KEY: &'static str;
    type Snapshot: Serialize + DeserializeOwned;

    fn snapshot(&self) -> Self::Snapshot;
    fn restore(&mut self, snapshot: Self::Snapshot);
}

/// What hydration found in a store's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    Empty,
    Restored,
    Malformed,
}

impl Hydration {
    pub fn as_str(self) -> &'static str {
        match self {
            Hydration::Empty => "empty",
            Hydration::Restored => "restored",
            Hydration::Malformed => "malformed",
        }
    }
}

impl<S: Persist + 'static> Store<S> {
    /// Seeds state from the store's slot. A malformed slot leaves the
    /// defaults in place. Subscribers are not notified.
    pub fn hydrate(&mut self, slots: &dyn SlotStorage) -> Hydration {
        let Some(raw) = slots.load(S::KEY) else {
            return Hydration::Empty;
        };
        match serde_json::from_value::<S::Snapshot>(raw) {
            Ok(snapshot) => {
                self.state.restore(snapshot);
                log::debug!("hydrated {} from slot {}", self.name, S::KEY);
                Hydration::Restored
            }
            Err(e) => {
                log::warn!(
                    "slot {} holds a malformed snapshot, using defaults: {}",
                    S::KEY,
                    e
                );
                Hydration::Malformed
            }
        }
    }

    /// Writes the store's snapshot to `slots` after every notified change.
    pub fn persist_to(&mut self, slots: std::rc::Rc<dyn SlotStorage>) {
        self.subscribe(move |state: &S| save_snapshot(&*slots, state));
    }
}

pub fn save_snapshot<S: Persist>(slots: &dyn SlotStorage, state: &S) {
    match serde_json::to_value(state.snapshot()) {
        Ok(value) => slots.save(S::KEY, &value),
        Err(e) => log::error!("failed to serialize snapshot for {}: {}", S::KEY, e),
    }
}

/// Draws uuid v4 ids until one is not taken.
pub fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken(&id) {
            return id;
        }
    }
}

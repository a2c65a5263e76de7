//! Listener registry.
//!
//! Each [`Puzzle`](crate::engine::Puzzle) owns one registry. Listeners are
//! boxed closures keyed by [`ListenerId`], optionally filtered to one
//! [`EventKind`], and called in registration order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::{EngineEvent, EventKind};

/// Handle returned by [`ListenerRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Callback signature for engine listeners.
pub type Listener = Box<dyn FnMut(&EngineEvent)>;

struct Entry {
    filter: Option<EventKind>,
    callback: Listener,
}

/// Storage and dispatch for listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: FxHashMap<ListenerId, Entry>,
    /// Registration order of the live ids.
    order: Vec<ListenerId>,
    next_id: u32,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event.
    pub fn subscribe(&mut self, callback: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.insert(None, Box::new(callback))
    }

    /// Register a listener for one kind of event.
    pub fn subscribe_to(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EngineEvent) + 'static,
    ) -> ListenerId {
        self.insert(Some(kind), Box::new(callback))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        if self.entries.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&live| live != id);
        true
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `event` to every matching listener, oldest first.
    pub fn emit(&mut self, event: &EngineEvent) {
        if self.entries.is_empty() {
            return;
        }

        let kind = event.kind();
        for id in &self.order {
            if let Some(entry) = self.entries.get_mut(id) {
                if entry.filter.map_or(true, |f| f == kind) {
                    (entry.callback)(event);
                }
            }
        }
    }

    fn insert(&mut self, filter: Option<EventKind>, callback: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { filter, callback });
        self.order.push(id);
        id
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

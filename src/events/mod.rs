//! Event delivery from the engine to its host.
//!
//! Hosts react to the engine through listeners registered on a specific
//! [`Puzzle`](crate::engine::Puzzle) instance. There is no global event bus.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tile_merge::engine::Puzzle;
//! use tile_merge::events::{EngineEvent, EventKind};
//!
//! let mut puzzle = Puzzle::with_seed(42);
//! let spawned = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&spawned);
//! puzzle.subscribe_to(EventKind::Generated, move |event| {
//!     if let EngineEvent::Generated { value, .. } = event {
//!         sink.borrow_mut().push(*value);
//!     }
//! });
//!
//! puzzle.initialize(4);
//! assert_eq!(spawned.borrow().len(), 1);
//! ```

mod event;
mod registry;

pub use event::{EngineEvent, EventKind};
pub use registry::{Listener, ListenerId, ListenerRegistry};

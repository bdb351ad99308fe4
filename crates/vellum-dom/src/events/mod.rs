//! Event dispatch engine
//!
//! Capture/bubble propagation over the document tree. Listener storage is
//! kept outside the tree in an [`EventRegistry`] so that listeners can be
//! plain `FnMut` closures while dispatch borrows the document shared.

mod event;
pub mod names;
pub mod observed;
mod registry;

pub use event::{AttrChange, Event, EventPayload, EventPhase, MouseData};
pub use registry::{EventRegistry, ListenerId};

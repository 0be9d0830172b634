//! # dom
//!
//! A small, id-keyed document model: elements with attributes and class
//! lists, text nodes, form-control values, and DOM-style event listener
//! registration.
//!
//! The crate does no layout and no painting. Hosts decide where an event
//! lands, ask [`Document::propagation_path`] which listeners it reaches, and
//! hand the event to whoever owns those listeners.

mod document;
mod event;
mod types;

#[cfg(test)]
mod tests;

pub use document::{Document, DomError};
pub use event::{DomEvent, EventKind, EventPayload, EventResponse, Key};
pub use types::{Id, ListenerId, NodeIndex, NodeKind};

//! Document events and their propagation rules.
//!
//! Only the event kinds the widgets in this workspace listen for are modeled.
//! Propagation follows the DOM: a capture phase from the root down to the
//! target's parent, the at-target phase, then (for bubbling kinds) a bubble
//! phase back up to the root.

use crate::types::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Paste,
    Focus,
    Blur,
    Click,
    KeyDown,
}

impl EventKind {
    /// `focus` and `blur` do not bubble; a container sees them only through
    /// a capturing listener.
    pub fn bubbles(self) -> bool {
        !matches!(self, EventKind::Focus | EventKind::Blur)
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Paste => "paste",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Character(char),
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventPayload {
    /// Plain-text clipboard payload.
    Paste { text: String },
    Focus,
    Blur,
    Click,
    KeyDown { key: Key },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomEvent {
    pub target: Id,
    pub payload: EventPayload,
}

impl DomEvent {
    pub fn paste(target: Id, text: impl Into<String>) -> Self {
        Self {
            target,
            payload: EventPayload::Paste { text: text.into() },
        }
    }

    pub fn focus(target: Id) -> Self {
        Self {
            target,
            payload: EventPayload::Focus,
        }
    }

    pub fn blur(target: Id) -> Self {
        Self {
            target,
            payload: EventPayload::Blur,
        }
    }

    pub fn click(target: Id) -> Self {
        Self {
            target,
            payload: EventPayload::Click,
        }
    }

    pub fn key_down(target: Id, key: Key) -> Self {
        Self {
            target,
            payload: EventPayload::KeyDown { key },
        }
    }

    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Paste { .. } => EventKind::Paste,
            EventPayload::Focus => EventKind::Focus,
            EventPayload::Blur => EventKind::Blur,
            EventPayload::Click => EventKind::Click,
            EventPayload::KeyDown { .. } => EventKind::KeyDown,
        }
    }
}

/// What the listeners that saw an event asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The host must not perform the event's default action
    /// (inserting the typed character, inserting pasted text).
    pub default_prevented: bool,
}

impl EventResponse {
    pub fn prevent_default() -> Self {
        Self {
            default_prevented: true,
        }
    }

    pub fn merge(self, other: EventResponse) -> Self {
        Self {
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_and_blur_do_not_bubble() {
        assert!(!EventKind::Focus.bubbles());
        assert!(!EventKind::Blur.bubbles());
        assert!(EventKind::Click.bubbles());
        assert!(EventKind::Paste.bubbles());
        assert!(EventKind::KeyDown.bubbles());
    }

    #[test]
    fn kind_follows_payload() {
        let target = Id(3);
        assert_eq!(DomEvent::paste(target, "a").kind(), EventKind::Paste);
        assert_eq!(
            DomEvent::key_down(target, Key::Character(',')).kind(),
            EventKind::KeyDown
        );
    }

    #[test]
    fn merged_response_keeps_prevent_default() {
        let merged = EventResponse::default().merge(EventResponse::prevent_default());
        assert!(merged.default_prevented);
        assert!(!EventResponse::default().merge(EventResponse::default()).default_prevented);
    }
}

pub type NodeIndex = u32;

/// Stable identity of a node within one [`Document`](crate::Document).
///
/// `Id(0)` is never handed out; ids of removed nodes are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeIndex);

impl Id {
    /// Reserved sentinel for "unassigned/invalid" identity.
    pub const INVALID: Id = Id(0);
}

/// Handle returned by [`Document::add_event_listener`](crate::Document::add_event_listener).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        /// Live value of a form control (`<input>`), distinct from the `value` attribute.
        value: String,
    },
    Text {
        text: String,
    },
}

impl NodeKind {
    pub fn element(name: &str) -> Self {
        NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: String::new(),
        }
    }

    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element { .. })
    }
}

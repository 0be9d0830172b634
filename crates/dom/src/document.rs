use crate::event::EventKind;
use crate::types::{Id, ListenerId, NodeIndex, NodeKind};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("unknown node {0:?}")]
    UnknownNode(Id),
    #[error("node {0:?} is not an element")]
    WrongNodeKind(Id),
    #[error("node {0:?} cannot take this child")]
    InvalidParent(Id),
    #[error("node {before:?} is not a child of {parent:?}")]
    InvalidSibling { parent: Id, before: Id },
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: Id, child: Id },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Listener {
    id: ListenerId,
    node: Id,
    kind: EventKind,
    capture: bool,
}

/// Id-keyed document tree. Removed nodes are freed; their ids are not reused.
///
/// Invariants:
/// - A node has at most one parent and never appears under its own subtree.
/// - Children order is explicit; `insert_before` and `append_child` are the only
///   ways to attach a node.
/// - Removing a node removes its whole subtree together with every listener
///   registered on it.
pub struct Document {
    nodes: HashMap<Id, NodeRecord>,
    next_id: NodeIndex,
    root: Id,
    body: Id,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Document {
    /// Create a document holding a single empty `<body>`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            // Id(0) stays reserved.
            next_id: 1,
            root: Id::INVALID,
            body: Id::INVALID,
            listeners: Vec::new(),
            next_listener: 1,
        };
        doc.root = doc.insert_node(NodeKind::Document);
        doc.body = doc.insert_node(NodeKind::element("body"));
        doc.attach(doc.root, doc.body);
        doc
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn body(&self) -> Id {
        self.body
    }

    pub fn create_element(&mut self, name: &str) -> Id {
        self.insert_node(NodeKind::element(name))
    }

    pub fn create_text(&mut self, text: &str) -> Id {
        self.insert_node(NodeKind::Text {
            text: text.to_string(),
        })
    }

    pub fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes currently held, connected or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when `id` is live and reachable from the document root.
    pub fn is_connected(&self, id: Id) -> bool {
        self.ancestors_inclusive(id).last() == Some(&self.root)
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.nodes.get(&id).map(|record| &record.kind)
    }

    pub fn tag_name(&self, id: Id) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.nodes.get(&id).and_then(|record| record.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.nodes
            .get(&id)
            .map(|record| record.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.check_attach(parent, child)?;
        self.attach(parent, child);
        Ok(())
    }

    pub fn insert_before(&mut self, parent: Id, child: Id, before: Id) -> Result<(), DomError> {
        self.check_attach(parent, child)?;
        if self.node(before)?.parent != Some(parent) {
            return Err(DomError::InvalidSibling { parent, before });
        }
        let siblings = &mut self.node_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|k| *k == before)
            .ok_or(DomError::InvalidSibling { parent, before })?;
        siblings.insert(pos, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove `id` and its subtree. Returns the number of listeners dropped with it.
    pub fn remove(&mut self, id: Id) -> Result<usize, DomError> {
        self.node(id)?;
        if id == self.root {
            return Err(DomError::InvalidParent(id));
        }
        if let Some(parent) = self.node_mut(id)?.parent.take()
            && let Some(record) = self.nodes.get_mut(&parent)
        {
            record.children.retain(|k| *k != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(record) = self.nodes.remove(&current) {
                stack.extend(record.children);
                removed.push(current);
            }
        }

        let before = self.listeners.len();
        self.listeners.retain(|l| !removed.contains(&l.node));
        let dropped = before - self.listeners.len();
        log::trace!(
            target: "dom",
            "removed {} node(s) under {id:?}, dropped {dropped} listener(s)",
            removed.len()
        );
        Ok(dropped)
    }

    pub fn attribute(&self, id: Id, name: &str) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, id: Id, name: &str, value: &str) -> Result<(), DomError> {
        let attributes = self.attributes_mut(id)?;
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => attributes.push((name.to_ascii_lowercase(), value.to_string())),
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: Id, name: &str) -> Result<bool, DomError> {
        let attributes = self.attributes_mut(id)?;
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        Ok(attributes.len() != before)
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: Id, class: &str) -> Result<(), DomError> {
        if class.is_empty() || self.has_class(id, class) {
            // Still reject non-elements so callers see misuse.
            self.attributes_mut(id)?;
            return Ok(());
        }
        let list = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &list)
    }

    pub fn remove_class(&mut self, id: Id, class: &str) -> Result<(), DomError> {
        let Some(existing) = self.attribute(id, "class") else {
            self.attributes_mut(id)?;
            return Ok(());
        };
        let list = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", &list)
    }

    /// Current value of a form control.
    pub fn value(&self, id: Id) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { value, .. } => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn set_value(&mut self, id: Id, new_value: &str) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element { value, .. } => {
                value.clear();
                value.push_str(new_value);
                Ok(())
            }
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    /// Concatenated text of every text node under `id`, in tree order.
    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(record) = self.nodes.get(&current) else {
                continue;
            };
            if let NodeKind::Text { text } = &record.kind {
                out.push_str(text);
            }
            stack.extend(record.children.iter().rev().copied());
        }
        out
    }

    /// First connected element, in tree order, whose `id` attribute equals `element_id`.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<Id> {
        if element_id.is_empty() {
            return None;
        }
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            if self.attribute(current, "id") == Some(element_id) {
                return Some(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        None
    }

    pub fn add_event_listener(
        &mut self,
        node: Id,
        kind: EventKind,
        capture: bool,
    ) -> Result<ListenerId, DomError> {
        self.node(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            node,
            kind,
            capture,
        });
        log::trace!(
            target: "dom",
            "listen {} on {node:?} (capture={capture}) -> {id:?}",
            kind.name()
        );
        Ok(id)
    }

    /// Returns `false` when the listener was already gone.
    pub fn remove_event_listener(&mut self, listener: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != listener);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners an event of `kind` fired at `target` reaches, in invocation order.
    ///
    /// Capture listeners on ancestors run root-first, then every listener on the
    /// target itself in registration order, then (if the kind bubbles) the
    /// non-capture listeners on ancestors, nearest first.
    pub fn propagation_path(&self, target: Id, kind: EventKind) -> Vec<ListenerId> {
        if !self.contains(target) {
            return Vec::new();
        }
        let mut path = self.ancestors_inclusive(target);
        path.reverse();
        let Some((&at_target, ancestors)) = path.split_last() else {
            return Vec::new();
        };

        let on = |node: Id, capture: Option<bool>| {
            self.listeners
                .iter()
                .filter(move |l| {
                    l.node == node && l.kind == kind && capture.is_none_or(|c| l.capture == c)
                })
                .map(|l| l.id)
        };

        let mut out = Vec::new();
        for &node in ancestors {
            out.extend(on(node, Some(true)));
        }
        out.extend(on(at_target, None));
        if kind.bubbles() {
            for &node in ancestors.iter().rev() {
                out.extend(on(node, Some(false)));
            }
        }
        out
    }

    fn ancestors_inclusive(&self, id: Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut current = Some(id).filter(|id| self.contains(*id));
        while let Some(node) = current {
            out.push(node);
            current = self.parent(node);
        }
        out
    }

    fn insert_node(&mut self, kind: NodeKind) -> Id {
        let id = Id(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            NodeRecord {
                kind,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    fn attach(&mut self, parent: Id, child: Id) {
        if !self.nodes.contains_key(&parent) {
            return;
        }
        if let Some(record) = self.nodes.get_mut(&child) {
            record.parent = Some(parent);
            if let Some(record) = self.nodes.get_mut(&parent) {
                record.children.push(child);
            }
        }
    }

    fn check_attach(&self, parent: Id, child: Id) -> Result<(), DomError> {
        let parent_record = self.node(parent)?;
        let child_record = self.node(child)?;
        if parent == child || self.ancestors_inclusive(parent).contains(&child) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if !parent_record.kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if child_record.parent.is_some() {
            return Err(DomError::InvalidParent(child));
        }
        Ok(())
    }

    fn node(&self, id: Id) -> Result<&NodeRecord, DomError> {
        self.nodes.get(&id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: Id) -> Result<&mut NodeRecord, DomError> {
        self.nodes.get_mut(&id).ok_or(DomError::UnknownNode(id))
    }

    fn attributes_mut(&mut self, id: Id) -> Result<&mut Vec<(String, String)>, DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes),
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

//! A document together with the widgets mounted in it.
//!
//! The page owns event delivery: it asks the document which listeners an
//! event reaches and hands the event to the widget that registered each one.

use crate::error::Result;
use crate::settings::SettingsOverrides;
use crate::widget::EmailsInput;
use dom::{Document, DomEvent, EventResponse, Id};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetHandle(usize);

pub struct Page {
    document: Rc<RefCell<Document>>,
    /// Indexed by `WidgetHandle`. Disposed widgets keep their slot so a stale
    /// handle never reaches a newer widget; after dispose a slot holds only
    /// the widget's collection and settings, its nodes are freed.
    widgets: Vec<EmailsInput>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            document: Rc::new(RefCell::new(Document::new())),
            widgets: Vec::new(),
        }
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    /// Append `<div id="{element_id}">` to the body.
    pub fn add_mount_point(&mut self, element_id: &str) -> Result<Id> {
        let mut doc = self.document.borrow_mut();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", element_id)?;
        let body = doc.body();
        doc.append_child(body, div)?;
        Ok(div)
    }

    pub fn mount<S: AsRef<str>>(
        &mut self,
        mount_id: &str,
        overrides: Option<&SettingsOverrides>,
        initial: &[S],
    ) -> Result<WidgetHandle> {
        let widget = EmailsInput::mount(Rc::clone(&self.document), mount_id, overrides, initial)?;
        self.widgets.push(widget);
        Ok(WidgetHandle(self.widgets.len() - 1))
    }

    pub fn widget(&self, handle: WidgetHandle) -> Option<&EmailsInput> {
        self.widgets.get(handle.0)
    }

    pub fn widget_mut(&mut self, handle: WidgetHandle) -> Option<&mut EmailsInput> {
        self.widgets.get_mut(handle.0)
    }

    /// Widgets that have not been disposed.
    pub fn widgets(&self) -> impl Iterator<Item = (WidgetHandle, &EmailsInput)> {
        self.widgets
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_disposed())
            .map(|(i, w)| (WidgetHandle(i), w))
    }

    /// Deliver `event` to every listener it reaches, in propagation order.
    pub fn dispatch(&mut self, event: &DomEvent) -> Result<EventResponse> {
        let path = self
            .document
            .borrow()
            .propagation_path(event.target, event.kind());
        log::trace!(
            target: "emails_input",
            "dispatch {} to {:?}: {} listener(s)",
            event.kind().name(),
            event.target,
            path.len()
        );

        let mut response = EventResponse::default();
        for listener in path {
            let Some(widget) = self.widgets.iter_mut().find(|w| w.owns_listener(listener)) else {
                continue;
            };
            response = response.merge(widget.handle_event(event)?);
        }
        Ok(response)
    }

    /// Dispose the widget behind `handle`. Unknown handles are ignored.
    pub fn dispose(&mut self, handle: WidgetHandle) -> Result<()> {
        match self.widgets.get_mut(handle.0) {
            Some(widget) => widget.dispose(),
            None => Ok(()),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

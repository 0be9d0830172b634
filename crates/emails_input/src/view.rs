//! Rendering side of the widget.
//!
//! [`EmailsView`] is the seam between the controller and whatever draws the
//! chips. [`DomView`] draws into a shared [`Document`]:
//!
//! ```text
//! <div id="mount">
//!   <div class="emails-input-field" tabindex="1">
//!     <span class="__validEmail">a@b.com<span class="__deleteEmailIcon"></span></span>
//!     <span class="__invalidEmail" data-validity="false">bad<span class="__deleteEmailIcon"></span></span>
//!     <input class="__inputElement" placeholder="add more people" type="email">
//!   </div>
//! </div>
//! ```

use crate::error::{EmailsInputError, Result};
use crate::settings::Settings;
use dom::{Document, DomError, EventKind, Id, ListenerId};
use std::cell::RefCell;
use std::rc::Rc;

pub const INPUT_PLACEHOLDER: &str = "add more people";

/// Node ids of a freshly rendered chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderedChip {
    pub chip: Id,
    pub delete_icon: Id,
}

pub trait EmailsView {
    /// The focusable element every widget listener is registered on.
    fn container(&self) -> Id;

    /// The trailing text-entry element.
    fn input(&self) -> Id;

    fn input_value(&self) -> String;

    /// Insert a chip right before the input and clear the input.
    fn render_chip(&mut self, address: &str, valid: bool) -> Result<RenderedChip>;

    fn remove_chip(&mut self, chip: Id) -> Result<()>;

    fn set_focus_styling(&mut self, focused: bool) -> Result<()>;

    fn listen(&mut self, kind: EventKind, capture: bool) -> Result<ListenerId>;

    fn unlisten(&mut self, listener: ListenerId);

    /// Remove everything the view added. Safe to call twice.
    fn detach(&mut self) -> Result<()>;
}

pub struct DomView {
    document: Rc<RefCell<Document>>,
    settings: Rc<Settings>,
    container: Id,
    input: Id,
}

impl DomView {
    pub fn mount(
        document: Rc<RefCell<Document>>,
        mount_id: &str,
        settings: Rc<Settings>,
    ) -> Result<Self> {
        if mount_id.is_empty() {
            return Err(EmailsInputError::MissingMountId);
        }

        let (container, input) = {
            let mut doc = document.borrow_mut();
            let mount = doc
                .get_element_by_id(mount_id)
                .ok_or_else(|| EmailsInputError::MountNotFound(mount_id.to_string()))?;

            let container = doc.create_element("div");
            doc.set_attribute(container, "class", &settings.input_field_class)?;
            doc.set_attribute(container, "tabindex", "1")?;
            doc.append_child(mount, container)?;

            let input = doc.create_element("input");
            doc.set_attribute(input, "placeholder", INPUT_PLACEHOLDER)?;
            doc.set_attribute(input, "type", "email")?;
            doc.set_attribute(input, "class", &settings.input_element_class)?;
            doc.append_child(container, input)?;
            (container, input)
        };

        log::debug!(target: "emails_input", "mounted view into #{mount_id} as {container:?}");
        Ok(Self {
            document,
            settings,
            container,
            input,
        })
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    /// Label, delete icon and validity styling for `chip`, then place it
    /// before the input. Returns the delete icon.
    fn fill_chip(
        &self,
        doc: &mut Document,
        chip: Id,
        address: &str,
        valid: bool,
    ) -> std::result::Result<Id, DomError> {
        let label = doc.create_text(address);
        doc.append_child(chip, label)?;

        let delete_icon = doc.create_element("span");
        doc.set_attribute(delete_icon, "class", &self.settings.delete_icon_class)?;
        doc.append_child(chip, delete_icon)?;

        if valid {
            doc.set_attribute(chip, "class", &self.settings.valid_block_class)?;
        } else {
            doc.set_attribute(chip, "class", &self.settings.invalid_block_class)?;
            doc.set_attribute(chip, "data-validity", "false")?;
        }

        doc.insert_before(self.container, chip, self.input)?;
        doc.set_value(self.input, "")?;
        Ok(delete_icon)
    }
}

impl EmailsView for DomView {
    fn container(&self) -> Id {
        self.container
    }

    fn input(&self) -> Id {
        self.input
    }

    fn input_value(&self) -> String {
        self.document
            .borrow()
            .value(self.input)
            .unwrap_or_default()
            .to_string()
    }

    fn render_chip(&mut self, address: &str, valid: bool) -> Result<RenderedChip> {
        let mut doc = self.document.borrow_mut();
        let chip = doc.create_element("span");
        match self.fill_chip(&mut doc, chip, address, valid) {
            Ok(delete_icon) => Ok(RenderedChip { chip, delete_icon }),
            Err(err) => {
                // A half-built chip must not outlive the failed render.
                if let Err(cleanup) = doc.remove(chip) {
                    log::warn!(target: "emails_input", "dropping partial chip: {cleanup}");
                }
                Err(err.into())
            }
        }
    }

    fn remove_chip(&mut self, chip: Id) -> Result<()> {
        self.document.borrow_mut().remove(chip)?;
        Ok(())
    }

    fn set_focus_styling(&mut self, focused: bool) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        if focused {
            doc.add_class(self.container, &self.settings.holder_focus_class)?;
        } else {
            doc.remove_class(self.container, &self.settings.holder_focus_class)?;
        }
        Ok(())
    }

    fn listen(&mut self, kind: EventKind, capture: bool) -> Result<ListenerId> {
        Ok(self
            .document
            .borrow_mut()
            .add_event_listener(self.container, kind, capture)?)
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.document.borrow_mut().remove_event_listener(listener);
    }

    fn detach(&mut self) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        if doc.contains(self.container) {
            doc.remove(self.container)?;
        }
        Ok(())
    }
}

//! The widget controller: turns document events into collection changes and
//! chips.

mod roles;


pub use roles::Validity;

use crate::collection::EmailCollection;
use crate::error::{EmailsInputError, Result};
use crate::notify::CountNotifier;
use crate::settings::{Settings, SettingsOverrides};
use crate::view::{DomView, EmailsView};
use dom::{Document, DomEvent, EventKind, EventPayload, EventResponse, Id, Key, ListenerId};
use roles::{Role, RoleTable};
use std::cell::RefCell;
use std::rc::Rc;

/// Key that commits the typed address without being inserted.
pub const SEPARATOR_KEY: char = ',';

/// Every listener a widget registers on its container, with its capture flag.
/// `focus`/`blur` do not bubble, so the container catches them while capturing.
const LISTENERS: [(EventKind, bool); 5] = [
    (EventKind::Paste, false),
    (EventKind::Focus, true),
    (EventKind::Blur, true),
    (EventKind::Click, false),
    (EventKind::KeyDown, false),
];

pub struct EmailsInput<V: EmailsView = DomView> {
    settings: Rc<Settings>,
    collection: EmailCollection,
    view: V,
    roles: RoleTable,
    listeners: Vec<ListenerId>,
    disposed: bool,
}

impl EmailsInput<DomView> {
    /// Mount a widget into the element with id `mount_id`.
    ///
    /// Every address in `initial` is validated before anything is added to the
    /// document; a single bad one fails the call and leaves the document as it was.
    pub fn mount<S: AsRef<str>>(
        document: Rc<RefCell<Document>>,
        mount_id: &str,
        overrides: Option<&SettingsOverrides>,
        initial: &[S],
    ) -> Result<Self> {
        if mount_id.is_empty() {
            return Err(EmailsInputError::MissingMountId);
        }
        Self::build(Settings::configure(overrides), initial, |settings| {
            DomView::mount(document, mount_id, settings)
        })
    }
}

impl<V: EmailsView> EmailsInput<V> {
    /// Validate `initial`, then create the view, render the initial chips, and
    /// register the listeners.
    pub fn build<S, F>(settings: Settings, initial: &[S], make_view: F) -> Result<Self>
    where
        S: AsRef<str>,
        F: FnOnce(Rc<Settings>) -> Result<V>,
    {
        let settings = Rc::new(settings);
        let collection = EmailCollection::from_initial(Rc::clone(&settings), initial)
            .map_err(EmailsInputError::InvalidInitialEmails)?;
        let view = make_view(Rc::clone(&settings))?;

        let mut roles = RoleTable::default();
        roles.assign(view.container(), Role::Container);
        roles.assign(view.input(), Role::Input);

        let mut widget = Self {
            settings,
            collection,
            view,
            roles,
            listeners: Vec::new(),
            disposed: false,
        };

        if let Err(err) = widget.render_initial().and_then(|()| widget.bind_listeners()) {
            if let Err(cleanup) = widget.dispose() {
                log::warn!(target: "emails_input", "cleanup after failed mount: {cleanup}");
            }
            return Err(err);
        }

        log::debug!(
            target: "emails_input",
            "widget {:?} ready with {} email(s)",
            widget.view.container(),
            widget.collection.count()
        );
        Ok(widget)
    }

    /// Add `raw` as a chip. Accepted addresses join the collection and render
    /// valid; duplicates and addresses failing validation render invalid.
    ///
    /// Only an empty `raw` (or a disposed widget) is an error.
    pub fn add_email(&mut self, raw: &str) -> Result<Validity> {
        self.ensure_live()?;
        if raw.is_empty() {
            return Err(EmailsInputError::EmptyAddress);
        }

        let validity = match self.collection.add(raw) {
            Ok(()) => {
                log::debug!(target: "emails_input", "accepted {raw:?}");
                Validity::Valid
            }
            Err(err) => {
                log::debug!(target: "emails_input", "rejected {raw:?}: {err}");
                Validity::Invalid
            }
        };
        // Without a chip the address could never be deleted again.
        if let Err(err) = self.render(raw, validity) {
            if validity.is_valid() {
                self.collection.remove(raw);
            }
            return Err(err);
        }
        Ok(validity)
    }

    /// Remove `raw` from the collection. The chip, if any, is left to the caller.
    pub fn delete_email(&mut self, raw: &str) -> Result<()> {
        self.ensure_live()?;
        if raw.is_empty() {
            return Err(EmailsInputError::EmptyDeleteAddress);
        }
        self.collection.remove(raw);
        Ok(())
    }

    pub fn valid_emails_count(&self) -> usize {
        self.collection.count()
    }

    pub fn show_valid_emails_count(&self, notifier: &mut impl CountNotifier) {
        notifier.notify_count(self.collection.count());
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.collection.iter().map(|e| e.as_str())
    }

    /// Chips currently shown, valid and invalid.
    pub fn chip_count(&self) -> usize {
        self.roles.chip_count()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn container(&self) -> Id {
        self.view.container()
    }

    pub fn input(&self) -> Id {
        self.view.input()
    }

    pub fn owns_listener(&self, listener: ListenerId) -> bool {
        self.listeners.contains(&listener)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Deregister every listener and remove the widget's elements.
    /// Calling it again does nothing.
    pub fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        for listener in self.listeners.drain(..) {
            self.view.unlisten(listener);
        }
        self.roles.clear();
        self.view.detach()?;
        log::debug!(target: "emails_input", "widget {:?} disposed", self.view.container());
        Ok(())
    }

    /// React to an event delivered to one of this widget's listeners.
    pub fn handle_event(&mut self, event: &DomEvent) -> Result<EventResponse> {
        if self.disposed {
            return Ok(EventResponse::default());
        }
        log::trace!(target: "emails_input", "{} on {:?}", event.kind().name(), event.target);

        match &event.payload {
            EventPayload::Paste { text } => {
                let separator = self.settings.paste_separator;
                for piece in text.split(separator) {
                    if piece.is_empty() {
                        continue;
                    }
                    self.add_email(piece)?;
                }
                Ok(EventResponse::prevent_default())
            }
            EventPayload::Focus => {
                self.view.set_focus_styling(true)?;
                Ok(EventResponse::default())
            }
            EventPayload::Blur => {
                if matches!(self.roles.get(event.target), Some(Role::Input)) {
                    self.commit_input()?;
                }
                self.view.set_focus_styling(false)?;
                Ok(EventResponse::default())
            }
            EventPayload::Click => {
                self.on_click(event.target)?;
                Ok(EventResponse::default())
            }
            EventPayload::KeyDown { key } => match key {
                Key::Enter => {
                    self.commit_input()?;
                    Ok(EventResponse::default())
                }
                Key::Character(SEPARATOR_KEY) => {
                    self.commit_input()?;
                    Ok(EventResponse::prevent_default())
                }
                _ => Ok(EventResponse::default()),
            },
        }
    }

    fn on_click(&mut self, target: Id) -> Result<()> {
        let Some(&Role::DeleteIcon { chip }) = self.roles.get(target) else {
            return Ok(());
        };
        if let Some((address, validity)) = self.roles.release_chip(chip)
            && validity.is_valid()
        {
            self.delete_email(&address)?;
        }
        self.view.remove_chip(chip)
    }

    /// Add whatever the input currently holds; an empty input is left alone.
    fn commit_input(&mut self) -> Result<()> {
        let value = self.view.input_value();
        if !value.is_empty() {
            self.add_email(&value)?;
        }
        Ok(())
    }

    fn render(&mut self, address: &str, validity: Validity) -> Result<()> {
        let rendered = self.view.render_chip(address, validity.is_valid())?;
        self.roles.assign(
            rendered.chip,
            Role::Chip {
                address: address.to_string(),
                validity,
                delete_icon: rendered.delete_icon,
            },
        );
        self.roles.assign(
            rendered.delete_icon,
            Role::DeleteIcon {
                chip: rendered.chip,
            },
        );
        Ok(())
    }

    fn render_initial(&mut self) -> Result<()> {
        let addresses: Vec<String> = self.emails().map(str::to_string).collect();
        for address in &addresses {
            self.render(address, Validity::Valid)?;
        }
        Ok(())
    }

    fn bind_listeners(&mut self) -> Result<()> {
        for (kind, capture) in LISTENERS {
            let listener = self.view.listen(kind, capture)?;
            self.listeners.push(listener);
        }
        Ok(())
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            return Err(EmailsInputError::Disposed);
        }
        Ok(())
    }
}

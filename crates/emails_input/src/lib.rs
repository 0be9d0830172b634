//! # emails_input
//!
//! A tag-style multi-email entry field. Typed or pasted text is split,
//! validated against length and pattern rules, and shown as removable chips;
//! accepted addresses are kept in an ordered collection whose size is the
//! count of valid emails.
//!
//! - [`Settings`] / [`SettingsOverrides`]: per-widget configuration.
//! - [`Outcome`]: result of validating one address.
//! - [`Email`] / [`EmailCollection`]: validated values and their ordered set.
//! - [`EmailsView`] / [`DomView`]: chip rendering into a [`dom::Document`].
//! - [`EmailsInput`]: the controller and its public API.
//! - [`Page`]: a document plus mounted widgets, with event delivery.
//!
//! ```
//! use emails_input::{Page, Validity};
//! use dom::{DomEvent, Key};
//!
//! let mut page = Page::new();
//! page.add_mount_point("emails").unwrap();
//! let handle = page.mount("emails", None, &["a@b.com"]).unwrap();
//!
//! let widget = page.widget_mut(handle).unwrap();
//! assert_eq!(widget.add_email("not valid").unwrap(), Validity::Invalid);
//! let input = widget.input();
//!
//! page.document().borrow_mut().set_value(input, "c@d.com").unwrap();
//! page.dispatch(&DomEvent::key_down(input, Key::Enter)).unwrap();
//!
//! assert_eq!(page.widget(handle).unwrap().valid_emails_count(), 2);
//! ```

mod collection;
mod email;
mod error;
mod notify;
mod outcome;
mod page;
mod settings;
mod view;
mod widget;

pub use collection::{CollectionError, EmailCollection};
pub use email::{Email, FAILED_PATTERN, INVALID_LENGTH, NOT_PRESENT};
pub use error::{EmailsInputError, Result};
pub use notify::{CountNotifier, LogNotifier};
pub use outcome::Outcome;
pub use page::{Page, WidgetHandle};
pub use settings::{DEFAULT_EMAIL_PATTERN, Settings, SettingsError, SettingsOverrides};
pub use view::{DomView, EmailsView, INPUT_PLACEHOLDER, RenderedChip};
pub use widget::{EmailsInput, SEPARATOR_KEY, Validity};

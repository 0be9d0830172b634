use crate::collection::CollectionError;
use dom::DomError;
use thiserror::Error;

/// Misuse of the widget API. Rejected user input never shows up here; it is
/// rendered as an invalid chip instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailsInputError {
    #[error("No document ID has been specified to generate view")]
    MissingMountId,
    #[error("no element with id {0:?} to mount into")]
    MountNotFound(String),
    #[error("The list of emails you tried to instantiate contains invalid emails ({0})")]
    InvalidInitialEmails(#[source] CollectionError),
    #[error("Not possible to add new email, because the email is not present")]
    EmptyAddress,
    #[error("Not possible to remove the email, email is passed incorrectly")]
    EmptyDeleteAddress,
    #[error("widget has been disposed")]
    Disposed,
    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, EmailsInputError>;

use crate::email::Email;
use crate::settings::Settings;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("This email is a duplicate: {0}")]
    Duplicate(String),
    #[error("{reason}: {address:?}")]
    Invalid { address: String, reason: String },
}

/// Ordered, duplicate-free list of validated addresses.
///
/// Addresses compare by exact string match; `A@b.com` and `a@b.com` are distinct.
#[derive(Clone, Debug)]
pub struct EmailCollection {
    settings: Rc<Settings>,
    emails: Vec<Email>,
}

impl EmailCollection {
    pub fn new(settings: Rc<Settings>) -> Self {
        Self {
            settings,
            emails: Vec::new(),
        }
    }

    /// Build a collection holding every address in `initial`, or nothing at all.
    ///
    /// The first invalid or repeated address aborts the whole batch.
    pub fn from_initial<S: AsRef<str>>(
        settings: Rc<Settings>,
        initial: &[S],
    ) -> Result<Self, CollectionError> {
        let mut collection = Self::new(settings);
        for raw in initial {
            collection.add(raw.as_ref())?;
        }
        Ok(collection)
    }

    pub fn count(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.emails.iter().any(|e| e.as_str() == raw)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Email> {
        self.emails.iter()
    }

    /// Duplicates are reported before validation errors.
    pub fn add(&mut self, raw: &str) -> Result<(), CollectionError> {
        if self.contains(raw) {
            return Err(CollectionError::Duplicate(raw.to_string()));
        }
        let email = Email::create(raw, &self.settings)
            .into_result()
            .map_err(|reason| CollectionError::Invalid {
                address: raw.to_string(),
                reason,
            })?;
        self.emails.push(email);
        Ok(())
    }

    /// Removes every entry equal to `raw`. Empty or absent addresses are a no-op.
    pub fn remove(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        self.emails.retain(|e| e.as_str() != raw);
    }
}

impl<'a> IntoIterator for &'a EmailCollection {
    type Item = &'a Email;
    type IntoIter = std::slice::Iter<'a, Email>;

    fn into_iter(self) -> Self::IntoIter {
        self.emails.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{FAILED_PATTERN, INVALID_LENGTH};

    fn empty() -> EmailCollection {
        EmailCollection::new(Rc::new(Settings::default()))
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut c = empty();
        c.add("c@d.com").unwrap();
        c.add("a@b.com").unwrap();

        let held: Vec<&str> = c.iter().map(Email::as_str).collect();
        assert_eq!(held, ["c@d.com", "a@b.com"]);
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn second_add_of_same_address_is_rejected() {
        let mut c = empty();
        c.add("x@y.com").unwrap();

        assert_eq!(
            c.add("x@y.com"),
            Err(CollectionError::Duplicate("x@y.com".into()))
        );
        assert_eq!(c.count(), 1);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut c = empty();
        c.add("x@y.com").unwrap();
        c.add("X@y.com").unwrap();
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn add_propagates_validation_reason() {
        let mut c = empty();
        assert_eq!(
            c.add("bad"),
            Err(CollectionError::Invalid {
                address: "bad".into(),
                reason: INVALID_LENGTH.into(),
            })
        );
        assert_eq!(
            c.add("not-an-email"),
            Err(CollectionError::Invalid {
                address: "not-an-email".into(),
                reason: FAILED_PATTERN.into(),
            })
        );
        assert!(c.is_empty());
    }

    #[test]
    fn remove_absent_or_empty_is_a_no_op() {
        let mut c = empty();
        c.add("a@b.com").unwrap();

        c.remove("c@d.com");
        c.remove("");
        assert_eq!(c.count(), 1);

        c.remove("a@b.com");
        assert_eq!(c.count(), 0);
        c.remove("a@b.com");
        assert_eq!(c.count(), 0);
    }

    #[test]
    fn initial_batch_is_all_or_nothing() {
        let settings = Rc::new(Settings::default());
        let err = EmailCollection::from_initial(settings.clone(), &["a@b.com", "bad"]).unwrap_err();
        assert!(matches!(err, CollectionError::Invalid { ref address, .. } if address == "bad"));

        let ok = EmailCollection::from_initial(settings, &["a@b.com", "c@d.com"]).unwrap();
        assert_eq!(ok.count(), 2);
    }

    #[test]
    fn initial_batch_rejects_repeats() {
        let err = EmailCollection::from_initial(
            Rc::new(Settings::default()),
            &["a@b.com".to_string(), "a@b.com".to_string()],
        )
        .unwrap_err();
        assert_eq!(err, CollectionError::Duplicate("a@b.com".into()));
    }
}

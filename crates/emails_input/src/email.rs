use crate::outcome::Outcome;
use crate::settings::Settings;
use std::fmt;

pub const NOT_PRESENT: &str = "Email is not present";
pub const INVALID_LENGTH: &str = "Length of email is invalid";
pub const FAILED_PATTERN: &str = "Email failed RegEx-test";

/// A validated address, exactly as it was entered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate `raw` against `settings`. The first failing rule wins:
    /// presence, then length (in characters, bounds inclusive), then pattern.
    ///
    /// No trimming or case folding happens; the address keeps its raw form.
    pub fn create(raw: &str, settings: &Settings) -> Outcome<Email> {
        if raw.is_empty() {
            return Outcome::fail(NOT_PRESENT);
        }
        let len = raw.chars().count();
        if len > settings.max_length || len < settings.min_length {
            return Outcome::fail(INVALID_LENGTH);
        }
        if !settings.email_regex.is_match(raw) {
            return Outcome::fail(FAILED_PATTERN);
        }
        Outcome::succeed(Email(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsOverrides;
    use proptest::prelude::*;

    fn create(raw: &str) -> Outcome<Email> {
        Email::create(raw, &Settings::default())
    }

    #[test]
    fn accepts_plain_address_unchanged() {
        let email = create("Jane.Doe@Example.com").unwrap();
        assert_eq!(email.as_str(), "Jane.Doe@Example.com");
        assert_eq!(email.to_string(), "Jane.Doe@Example.com");
    }

    #[test]
    fn empty_input_is_not_present() {
        assert_eq!(create("").error(), Some(NOT_PRESENT));
    }

    #[test]
    fn length_is_checked_before_pattern() {
        // Too short and malformed: length wins.
        assert_eq!(create("a@b").error(), Some(INVALID_LENGTH));
        assert_eq!(create(&"x".repeat(31)).error(), Some(INVALID_LENGTH));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(create("a@b.cd").is_success()); // 6
        let thirty = format!("{}@b.com", "a".repeat(24));
        assert_eq!(thirty.len(), 30);
        assert!(create(&thirty).is_success());
    }

    #[test]
    fn pattern_failures() {
        for raw in ["plainaddress", "a b@c.com", "a@@b.com", "a@bcom.", "@b.com.x", "ab@.com"] {
            assert_eq!(create(raw).error(), Some(FAILED_PATTERN), "{raw}");
        }
    }

    #[test]
    fn leading_space_is_not_trimmed() {
        assert_eq!(create(" c@d.com").error(), Some(FAILED_PATTERN));
    }

    #[test]
    fn length_counts_characters() {
        let settings = Settings::configure(Some(&SettingsOverrides {
            max_length: Some(8),
            ..Default::default()
        }));
        // 8 characters, 12 bytes.
        assert!(Email::create("é@é.éé.x", &settings).is_success());
    }

    #[test]
    fn astral_characters_count_once_at_max_length() {
        let at_max = format!("😀{}@b.com", "a".repeat(23));
        assert_eq!(at_max.chars().count(), 30);
        assert_eq!(at_max.encode_utf16().count(), 31);
        assert!(create(&at_max).is_success());

        let over = format!("😀{}@b.com", "a".repeat(24));
        assert_eq!(create(&over).error(), Some(INVALID_LENGTH));
    }

    proptest! {
        #[test]
        fn well_formed_addresses_within_bounds_are_accepted(
            local in "[a-z0-9._]{1,10}",
            domain in "[a-z0-9]{1,8}",
            tld in "[a-z]{2,6}",
        ) {
            let raw = format!("{local}@{domain}.{tld}");
            prop_assume!(raw.len() >= 6);
            let email = create(&raw).unwrap();
            prop_assert_eq!(email.as_str(), raw.as_str());
        }

        #[test]
        fn out_of_bounds_addresses_fail_on_length(
            local in "[a-z]",
            long_local in "[a-z]{30,40}",
        ) {
            let short = format!("{local}@b.c");
            let short_outcome = create(&short);
            prop_assert_eq!(short_outcome.error(), Some(INVALID_LENGTH));

            let long = format!("{long_local}@b.com");
            let long_outcome = create(&long);
            prop_assert_eq!(long_outcome.error(), Some(INVALID_LENGTH));
        }
    }
}

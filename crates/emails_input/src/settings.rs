//! Per-widget configuration.
//!
//! A widget builds its [`Settings`] once, at construction, by laying a
//! [`SettingsOverrides`] record over the defaults. The result is held behind an
//! `Rc` and never mutated; two widgets on the same page never share one.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub input_field_class: String,
    pub input_element_class: String,
    pub valid_block_class: String,
    pub invalid_block_class: String,
    pub delete_icon_class: String,
    pub holder_focus_class: String,
    pub max_length: usize,
    pub min_length: usize,
    pub email_regex: Regex,
    pub paste_separator: char,
}

impl Settings {
    /// Defaults with every `Some` field of `overrides` applied key-by-key.
    ///
    /// Override values are taken as given; nothing checks that, say,
    /// `min_length <= max_length`.
    pub fn configure(overrides: Option<&SettingsOverrides>) -> Self {
        let mut settings = Self::default();
        let Some(o) = overrides else {
            return settings;
        };

        if let Some(v) = &o.input_field_class {
            settings.input_field_class = v.clone();
        }
        if let Some(v) = &o.input_element_class {
            settings.input_element_class = v.clone();
        }
        if let Some(v) = &o.valid_block_class {
            settings.valid_block_class = v.clone();
        }
        if let Some(v) = &o.invalid_block_class {
            settings.invalid_block_class = v.clone();
        }
        if let Some(v) = &o.delete_icon_class {
            settings.delete_icon_class = v.clone();
        }
        if let Some(v) = &o.holder_focus_class {
            settings.holder_focus_class = v.clone();
        }
        if let Some(v) = o.max_length {
            settings.max_length = v;
        }
        if let Some(v) = o.min_length {
            settings.min_length = v;
        }
        if let Some(v) = &o.email_regex {
            settings.email_regex = v.clone();
        }
        if let Some(v) = o.paste_separator {
            settings.paste_separator = v;
        }
        settings
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_field_class: "emails-input-field".into(),
            input_element_class: "__inputElement".into(),
            valid_block_class: "__validEmail".into(),
            invalid_block_class: "__invalidEmail".into(),
            delete_icon_class: "__deleteEmailIcon".into(),
            holder_focus_class: "__emailHolderFocus".into(),
            max_length: 30,
            min_length: 6,
            email_regex: default_email_regex(),
            paste_separator: ',',
        }
    }
}

fn default_email_regex() -> Regex {
    Regex::new(DEFAULT_EMAIL_PATTERN).expect("default email pattern compiles")
}

/// Partial settings. `None` keeps the default.
///
/// Deserializes from TOML; the camelCase names the widget historically used
/// (`maxLengthEmail`, `emailRegEx`, ...) are accepted next to the snake_case ones.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOverrides {
    #[serde(alias = "emailInputFieldCSS")]
    pub input_field_class: Option<String>,
    #[serde(alias = "emailInputElementCSS")]
    pub input_element_class: Option<String>,
    #[serde(alias = "emailValidBlockCSS")]
    pub valid_block_class: Option<String>,
    #[serde(alias = "emailInvalidBlockCSS")]
    pub invalid_block_class: Option<String>,
    #[serde(alias = "emailDeleteIconCSS")]
    pub delete_icon_class: Option<String>,
    #[serde(alias = "emailHolderFocusCSS")]
    pub holder_focus_class: Option<String>,
    #[serde(alias = "maxLengthEmail")]
    pub max_length: Option<usize>,
    #[serde(alias = "minLengthEmail")]
    pub min_length: Option<usize>,
    #[serde(alias = "emailRegEx", deserialize_with = "deserialize_regex")]
    pub email_regex: Option<Regex>,
    #[serde(alias = "copyPasteSeparator")]
    pub paste_separator: Option<char>,
}

impl SettingsOverrides {
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides = Self::from_toml_str(&source)?;
        log::debug!(target: "emails_input", "loaded settings overrides from {}", path.display());
        Ok(overrides)
    }
}

fn deserialize_regex<'de, D>(deserializer: D) -> Result<Option<Regex>, D::Error>
where
    D: Deserializer<'de>,
{
    let pattern = Option::<String>::deserialize(deserializer)?;
    pattern
        .map(|p| Regex::new(&p).map_err(serde::de::Error::custom))
        .transpose()
}

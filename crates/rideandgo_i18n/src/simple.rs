//! YAML string catalogs
//!
//! A catalog is a flat YAML mapping of keys to strings:
//!
//! ```yaml
//! whereToGo: "Where to?"
//! fareSummary: "Estimated fare: {fare} €"
//! ```
//!
//! Values may contain `{name}` placeholders filled from a [`Message`]'s arguments.
//! `{{` and `}}` produce literal braces. Unknown placeholders are left visible.

use std::collections::HashMap;

use thiserror::Error;

use crate::label::Message;

const MAX_CATALOG_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;
const MAX_EXPANDED_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum SimpleParseError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("catalog must be a mapping of keys to strings")]
    NotAMapping,

    #[error("too many entries (max 10000)")]
    TooManyEntries,

    #[error("catalog keys must be strings")]
    NonStringKey,

    #[error("invalid key `{0}` (allowed: [A-Za-z0-9][A-Za-z0-9_.-]*)")]
    InvalidKey(String),

    #[error("key `{0}` is too long (max 128 bytes)")]
    KeyTooLong(String),

    #[error("value for key `{0}` must be a string")]
    NonStringValue(String),

    #[error("value for key `{0}` is too long (max 16 KiB)")]
    ValueTooLong(String),
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Key-to-template table for one locale
#[derive(Clone, Debug, Default)]
pub struct SimpleCatalog {
    entries: HashMap<String, String>,
}

impl SimpleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML mapping, enforcing key syntax and size limits
    pub fn parse(src: &str) -> Result<Self, SimpleParseError> {
        let raw = match serde_yaml::from_str::<serde_yaml::Value>(src)? {
            serde_yaml::Value::Mapping(raw) => raw,
            _ => return Err(SimpleParseError::NotAMapping),
        };
        if raw.len() > MAX_CATALOG_ENTRIES {
            return Err(SimpleParseError::TooManyEntries);
        }

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let serde_yaml::Value::String(key) = key else {
                return Err(SimpleParseError::NonStringKey);
            };
            if !is_valid_key(&key) {
                return Err(SimpleParseError::InvalidKey(key));
            }
            if key.len() > MAX_KEY_BYTES {
                return Err(SimpleParseError::KeyTooLong(key));
            }
            let serde_yaml::Value::String(value) = value else {
                return Err(SimpleParseError::NonStringValue(key));
            };
            if value.len() > MAX_VALUE_BYTES {
                return Err(SimpleParseError::ValueTooLong(key));
            }
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw template for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Template for the message id with its arguments substituted
    pub fn format_message(&self, msg: &Message) -> Option<String> {
        self.get(&msg.id).map(|tmpl| apply_placeholders(tmpl, msg))
    }
}

/// Output buffer that stops growing at [`MAX_EXPANDED_BYTES`]
struct Bounded {
    out: String,
}

impl Bounded {
    fn new(hint: usize) -> Self {
        Self {
            out: String::with_capacity(hint.min(MAX_EXPANDED_BYTES)),
        }
    }

    /// Append as much of `s` as fits; returns false once the buffer is full
    fn push(&mut self, s: &str) -> bool {
        let remaining = MAX_EXPANDED_BYTES - self.out.len();
        if s.len() <= remaining {
            self.out.push_str(s);
            return self.out.len() < MAX_EXPANDED_BYTES;
        }
        let mut end = remaining;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.out.push_str(&s[..end]);
        false
    }

    fn push_char(&mut self, c: char) -> bool {
        self.push(c.encode_utf8(&mut [0; 4]))
    }
}

pub(crate) fn apply_placeholders(tmpl: &str, msg: &Message) -> String {
    if !tmpl.contains(['{', '}']) {
        return tmpl.to_string();
    }

    let mut out = Bounded::new(tmpl.len() + 16);
    let mut rest = tmpl;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];

        let open = match c {
            '{' => true,
            '}' => false,
            _ => {
                if !out.push_char(c) {
                    break;
                }
                continue;
            }
        };

        // `{{` and `}}` collapse to a single brace; a lone `}` passes through
        if rest.starts_with(c) || !open {
            if rest.starts_with(c) {
                rest = &rest[1..];
            }
            if !out.push_char(c) {
                break;
            }
            continue;
        }

        let Some(close) = rest.find('}') else {
            // Unterminated placeholder: keep the remainder as text
            out.push_char('{');
            out.push(rest);
            break;
        };
        let name = rest[..close].trim();
        rest = &rest[close + 1..];

        let keep_going = match msg.get(name) {
            Some(value) if !name.is_empty() => out.push(&value.to_string()),
            _ => out.push_char('{') && out.push(name) && out.push_char('}'),
        };
        if !keep_going {
            break;
        }
    }

    out.out
}

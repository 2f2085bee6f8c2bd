//! Attribute selectors for discovering controls and tables.
//!
//! A [`Selector`] is either rendered as CSS for a browser query or evaluated
//! directly against an element. Rendering escapes every component with the
//! CSSOM `CSS.escape` algorithm, so a group string is always an opaque token
//! and never selector syntax.

use std::fmt::{self, Write as _};

/// Match elements by tag and by the presence or exact value of one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Element tag, matched ASCII case-insensitively.
    tag: String,
    /// Attribute name.
    attribute: String,
    /// Exact attribute value; `None` matches any value.
    value: Option<String>,
}

impl Selector {
    /// `tag[attribute]`
    pub fn has_attribute(tag: &str, attribute: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            value: None,
        }
    }

    /// `tag[attribute="value"]`
    pub fn attribute_equals(tag: &str, attribute: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            value: Some(value.to_string()),
        }
    }

    /// Tag this selector matches.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute this selector inspects.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Evaluate against an element with the given tag and attribute lookup.
    pub fn matches<'a, F>(&self, tag: &str, lookup: F) -> bool
    where
        F: FnOnce(&str) -> Option<&'a str>,
    {
        if !tag.eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        match (lookup(&self.attribute), &self.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}", escape_css(&self.tag), escape_css(&self.attribute))?;
        if let Some(value) = &self.value {
            write!(f, "=\"{}\"", escape_css(value))?;
        }
        f.write_char(']')
    }
}

/// Escape `input` for use as a CSS identifier or string (`CSS.escape`).
pub fn escape_css(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let first = input.chars().next();
    let single = input.chars().nth(1).is_none();
    for (i, ch) in input.chars().enumerate() {
        let leading_digit = ch.is_ascii_digit() && (i == 0 || (i == 1 && first == Some('-')));
        match ch {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_hex(&mut out, ch),
            _ if leading_digit => push_hex(&mut out, ch),
            '-' if i == 0 && single => out.push_str("\\-"),
            '-' | '_' | '0'..='9' | 'a'..='z' | 'A'..='Z' => out.push(ch),
            _ if !ch.is_ascii() => out.push(ch),
            _ => {
                out.push('\\');
                out.push(ch);
            }
        }
    }
    out
}

/// Append `\<hex> ` for `ch`.
fn push_hex(out: &mut String, ch: char) {
    let _ignored = write!(out, "\\{:x} ", u32::from(ch));
}

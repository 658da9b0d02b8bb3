//! Metadata row assembly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{config::PublishedAt, error::DateFormatError, locale::HeaderLocale};

/// Reading speed used by [`estimate_reading_time`] when callers have no better figure.
///
/// Counted in characters, which suits CJK text where words are not space-delimited.
pub const DEFAULT_CHARS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// Display value of a metadata entry.
pub enum MetaValue {
    /// Whole number.
    Integer(i64),
    /// Fractional number; whole values display without a decimal point.
    Float(f64),
    /// Pre-formatted text.
    Text(String),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for MetaValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Icon shown before a metadata label.
pub enum MetaIcon {
    /// The header's built-in clock glyph.
    Default,
    /// Caller-owned text glyph (typically an emoji).
    Glyph(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One entry of the metadata row.
pub struct MetaField {
    /// Display name.
    pub label: String,
    /// Display value.
    pub value: MetaValue,
    /// Optional leading icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MetaIcon>,
    /// Optional class applied to the value instead of the style sheet default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_override: Option<String>,
}

impl MetaField {
    /// Creates an entry without icon or style override.
    pub fn new(label: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon: None,
            style_override: None,
        }
    }

    /// Sets the leading icon.
    pub fn with_icon(mut self, icon: MetaIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the value class override.
    pub fn with_style_override(mut self, class: impl Into<String>) -> Self {
        self.style_override = Some(class.into());
        self
    }

    fn computed(label: &str, value: String) -> Self {
        Self::new(label, value).with_icon(MetaIcon::Default)
    }
}

/// Builds the ordered metadata row.
///
/// Caller fields come first, followed by whichever of published, author, reading time, and
/// category are present, in that order. Nothing is sorted or deduplicated. Empty text and a zero
/// reading time count as absent.
///
/// # Errors
///
/// Returns [`DateFormatError`] when `published_at` cannot be interpreted as a date.
pub fn assemble_metadata(
    caller_fields: &[MetaField],
    published_at: Option<&PublishedAt>,
    author: Option<&str>,
    reading_time: Option<u32>,
    category: Option<&str>,
    locale: HeaderLocale,
) -> Result<Vec<MetaField>, DateFormatError> {
    let published = published_at
        .map(|published_at| published_at.resolve().map(|date| locale.long_date(date.calendar)))
        .transpose()?;
    Ok(append_computed_fields(
        caller_fields,
        published,
        author,
        reading_time,
        category,
        locale,
    ))
}

pub(crate) fn append_computed_fields(
    caller_fields: &[MetaField],
    published: Option<String>,
    author: Option<&str>,
    reading_time: Option<u32>,
    category: Option<&str>,
    locale: HeaderLocale,
) -> Vec<MetaField> {
    let mut fields = Vec::with_capacity(caller_fields.len() + 4);
    fields.extend_from_slice(caller_fields);

    if let Some(published) = published {
        fields.push(MetaField::computed(locale.published_label(), published));
    }
    if let Some(author) = author.filter(|author| !author.is_empty()) {
        fields.push(MetaField::computed(locale.author_label(), author.to_string()));
    }
    if let Some(minutes) = reading_time.filter(|minutes| *minutes > 0) {
        fields.push(MetaField::computed(
            locale.reading_time_label(),
            locale.reading_time(minutes),
        ));
    }
    if let Some(category) = category.filter(|category| !category.is_empty()) {
        fields.push(MetaField::computed(locale.category_label(), category.to_string()));
    }

    fields
}

/// Estimates reading minutes for `content`, rounding partial minutes up.
///
/// A `chars_per_minute` of zero falls back to [`DEFAULT_CHARS_PER_MINUTE`].
pub fn estimate_reading_time(content: &str, chars_per_minute: u32) -> u32 {
    let rate = if chars_per_minute == 0 {
        DEFAULT_CHARS_PER_MINUTE
    } else {
        chars_per_minute
    };
    let chars = u32::try_from(content.chars().count()).unwrap_or(u32::MAX);
    chars.div_ceil(rate)
}

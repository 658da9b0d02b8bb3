//! Header input configuration and validation.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    appearance::AppearanceMode,
    error::{ConfigValidationError, DateFormatError, HeaderError},
    locale::HeaderLocale,
    metadata::{append_computed_fields, assemble_metadata, MetaField},
    render_state::RenderState,
};

const TEXT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const TEXT_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Publish date as supplied by the caller.
pub enum PublishedAt {
    /// Calendar date, interpreted as midnight UTC.
    Date(NaiveDate),
    /// Exact instant, keeping the offset it was written with.
    DateTime(DateTime<FixedOffset>),
    /// Unparsed text; interpreted when the header renders.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedDate {
    /// Date as written by the caller, before any timezone conversion.
    pub(crate) calendar: NaiveDate,
    pub(crate) instant: DateTime<Utc>,
}

impl PublishedAt {
    /// Returns `true` for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Returns the publish instant in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`DateFormatError`] for text in none of the accepted formats.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, DateFormatError> {
        self.resolve().map(|date| date.instant)
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedDate, DateFormatError> {
        match self {
            Self::Date(date) => Ok(ResolvedDate::midnight(*date)),
            Self::DateTime(instant) => Ok(ResolvedDate::written(*instant)),
            Self::Text(text) => {
                parse_date_text(text.trim()).ok_or_else(|| DateFormatError::new(text))
            }
        }
    }
}

impl ResolvedDate {
    fn written(instant: DateTime<FixedOffset>) -> Self {
        Self {
            calendar: instant.date_naive(),
            instant: instant.with_timezone(&Utc),
        }
    }

    fn midnight(date: NaiveDate) -> Self {
        Self {
            calendar: date,
            instant: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

fn parse_date_text(text: &str) -> Option<ResolvedDate> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(ResolvedDate::written(instant));
    }
    if let Some(date) = TEXT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(ResolvedDate::midnight(date));
    }
    TEXT_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|local| ResolvedDate {
            calendar: local.date(),
            instant: local.and_utc(),
        })
}

impl From<&str> for PublishedAt {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PublishedAt {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for PublishedAt {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for PublishedAt {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for PublishedAt {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Complete header input.
///
/// Deserializes from camelCase JSON; every field except `title` has a default.
pub struct HeaderConfig {
    /// Heading text. May be empty only while the placeholder is shown.
    #[serde(default)]
    pub title: String,
    /// Secondary heading.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Caller metadata entries, rendered before the computed ones.
    #[serde(default)]
    pub meta_fields: Vec<MetaField>,
    /// Publish date.
    #[serde(default)]
    pub published_at: Option<PublishedAt>,
    /// Author display name.
    #[serde(default)]
    pub author: Option<String>,
    /// Reading time in minutes.
    #[serde(default)]
    pub reading_time: Option<i64>,
    /// Article section.
    #[serde(default)]
    pub category: Option<String>,
    /// Tag list, rendered in order with duplicates kept.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Light/dark selection.
    #[serde(default, rename = "appearanceOverride")]
    pub appearance: AppearanceMode,
    /// Starts in the loading placeholder state.
    #[serde(default)]
    pub show_placeholder: bool,
    /// Emits the schema.org annotation.
    #[serde(default = "default_structured_data_enabled")]
    pub structured_data_enabled: bool,
    /// Keys merged over the computed annotation.
    #[serde(default)]
    pub structured_data_overrides: Map<String, Value>,
    /// Extra class appended to the container.
    #[serde(default, rename = "styleClassName")]
    pub class: String,
    /// Locale for computed labels and dates.
    #[serde(default)]
    pub locale: HeaderLocale,
}

fn default_structured_data_enabled() -> bool {
    true
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            meta_fields: Vec::new(),
            published_at: None,
            author: None,
            reading_time: None,
            category: None,
            tags: Vec::new(),
            appearance: AppearanceMode::Auto,
            show_placeholder: false,
            structured_data_enabled: default_structured_data_enabled(),
            structured_data_overrides: Map::new(),
            class: String::new(),
            locale: HeaderLocale::EnUs,
        }
    }
}

impl HeaderConfig {
    /// Creates a config with `title` and every other field defaulted.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Json`] for malformed input, [`HeaderError::Validation`] for the
    /// first contract violation, and [`HeaderError::Date`] for an unparseable publish date.
    pub fn from_json(raw: &str) -> Result<Self, HeaderError> {
        serde_json::from_str::<Self>(raw)?.checked()
    }

    /// Converts and validates an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`HeaderConfig::from_json`].
    pub fn from_value(value: Value) -> Result<Self, HeaderError> {
        serde_json::from_value::<Self>(value)?.checked()
    }

    fn checked(self) -> Result<Self, HeaderError> {
        self.validate()?;
        if let Some(published) = self.published() {
            published.resolve()?;
        }
        Ok(self)
    }

    /// Checks construction-time contracts.
    ///
    /// # Errors
    ///
    /// Returns the first issue reported by [`HeaderConfig::issues`].
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match self.issues().into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }

    /// Lists every contract violation, in field order.
    pub fn issues(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() && !self.show_placeholder {
            issues.push(ConfigValidationError::MissingTitle);
        }
        issues.extend(
            self.meta_fields
                .iter()
                .enumerate()
                .filter(|(_, field)| field.label.trim().is_empty())
                .map(|(index, _)| ConfigValidationError::EmptyMetaLabel(index)),
        );
        if let Some(minutes) = self.reading_time.filter(|minutes| *minutes < 0) {
            issues.push(ConfigValidationError::NegativeReadingTime(minutes));
        }
        issues
    }

    /// Subtitle, if present and non-empty.
    pub fn subtitle_text(&self) -> Option<&str> {
        non_empty(self.subtitle.as_deref())
    }

    /// Author, if present and non-empty.
    pub fn author_text(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }

    /// Category, if present and non-empty.
    pub fn category_text(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    /// Publish date, unless absent or blank text.
    pub fn published(&self) -> Option<&PublishedAt> {
        self.published_at.as_ref().filter(|published| !published.is_blank())
    }

    /// Reading time, when positive. Negative values are ignored here and reported by
    /// [`HeaderConfig::issues`].
    pub fn reading_time_minutes(&self) -> Option<u32> {
        self.reading_time
            .filter(|minutes| *minutes > 0)
            .map(|minutes| u32::try_from(minutes).unwrap_or(u32::MAX))
    }

    /// Render state a freshly constructed header starts in.
    pub fn initial_render_state(&self) -> RenderState {
        RenderState::initial(self.show_placeholder)
    }

    /// Assembles the metadata row.
    ///
    /// # Errors
    ///
    /// Returns [`DateFormatError`] when the publish date cannot be interpreted.
    pub fn assemble_metadata(&self) -> Result<Vec<MetaField>, DateFormatError> {
        assemble_metadata(
            &self.meta_fields,
            self.published(),
            self.author_text(),
            self.reading_time_minutes(),
            self.category_text(),
            self.locale,
        )
    }

    /// Assembles the metadata row, omitting the published entry when the date is unparseable.
    ///
    /// The date error is returned alongside so the caller can report it.
    pub fn assemble_metadata_lenient(&self) -> (Vec<MetaField>, Option<DateFormatError>) {
        let (published, error) = match self.published().map(PublishedAt::resolve) {
            Some(Ok(date)) => (Some(self.locale.long_date(date.calendar)), None),
            Some(Err(err)) => (None, Some(err)),
            None => (None, None),
        };
        let fields = append_computed_fields(
            &self.meta_fields,
            published,
            self.author_text(),
            self.reading_time_minutes(),
            self.category_text(),
            self.locale,
        );
        (fields, error)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

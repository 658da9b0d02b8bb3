//! schema.org `Article` annotation for search engines.

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::{config::HeaderConfig, error::DateFormatError};

/// `@context` of the emitted annotation.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";
/// `@type` of the emitted annotation.
pub const ARTICLE_TYPE: &str = "Article";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
/// Ordered JSON-LD object describing the article.
pub struct StructuredData(Map<String, Value>);

impl StructuredData {
    /// Looks up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrows the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Serializes for a `<script type="application/ld+json">` body.
    ///
    /// `</` is escaped as `<\/` (still valid JSON) so string content cannot close the script
    /// element early.
    pub fn to_script_payload(&self) -> String {
        Value::Object(self.0.clone()).to_string().replace("</", "<\\/")
    }
}

/// Builds the annotation for `config`.
///
/// Returns `Ok(None)` when structured data is disabled or the title is empty. Computed keys are
/// absent when their source is; `structured_data_overrides` is merged last, one level deep, and
/// replaces same-named keys.
///
/// # Errors
///
/// Returns [`DateFormatError`] when the publish date cannot be interpreted.
pub fn generate_structured_data(
    config: &HeaderConfig,
) -> Result<Option<StructuredData>, DateFormatError> {
    if !emits_structured_data(config) {
        return Ok(None);
    }
    let date_published = config
        .published()
        .map(|published| published.to_utc().map(iso_timestamp))
        .transpose()?;
    Ok(Some(build(config, date_published)))
}

impl HeaderConfig {
    /// Builds the annotation, dropping `datePublished` when the date is unparseable.
    ///
    /// The date error is returned alongside so the caller can report it.
    pub fn structured_data_lenient(&self) -> (Option<StructuredData>, Option<DateFormatError>) {
        if !emits_structured_data(self) {
            return (None, None);
        }
        let (date_published, error) = match self.published().map(|published| published.to_utc()) {
            Some(Ok(instant)) => (Some(iso_timestamp(instant)), None),
            Some(Err(err)) => (None, Some(err)),
            None => (None, None),
        };
        (Some(build(self, date_published)), error)
    }
}

fn emits_structured_data(config: &HeaderConfig) -> bool {
    config.structured_data_enabled && !config.title.trim().is_empty()
}

fn iso_timestamp(instant: chrono::DateTime<chrono::Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn build(config: &HeaderConfig, date_published: Option<String>) -> StructuredData {
    let mut data = Map::new();
    data.insert("@context".into(), json!(SCHEMA_CONTEXT));
    data.insert("@type".into(), json!(ARTICLE_TYPE));
    data.insert("headline".into(), json!(config.title));
    if let Some(subtitle) = config.subtitle_text() {
        data.insert("alternativeHeadline".into(), json!(subtitle));
    }
    if let Some(author) = config.author_text() {
        data.insert(
            "author".into(),
            json!({ "@type": "Person", "name": author }),
        );
    }
    if let Some(date_published) = date_published {
        data.insert("datePublished".into(), json!(date_published));
    }
    if let Some(category) = config.category_text() {
        data.insert("articleSection".into(), json!(category));
    }
    if !config.tags.is_empty() {
        data.insert("keywords".into(), json!(config.tags.join(", ")));
    }

    for (key, value) in &config.structured_data_overrides {
        data.insert(key.clone(), value.clone());
    }
    StructuredData(data)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn article() -> HeaderConfig {
        HeaderConfig {
            subtitle: Some("From state to performance".into()),
            published_at: Some("2024-01-15".into()),
            author: Some("Bob".into()),
            category: Some("Frontend".into()),
            tags: vec!["a".into(), "b".into()],
            ..HeaderConfig::new("Understanding hooks")
        }
    }

    #[test]
    fn full_article_annotation_in_schema_order() {
        let data = generate_structured_data(&article())
            .expect("generate")
            .expect("enabled");

        assert_eq!(
            data.clone().into_value(),
            json!({
                "@context": "https://schema.org",
                "@type": "Article",
                "headline": "Understanding hooks",
                "alternativeHeadline": "From state to performance",
                "author": { "@type": "Person", "name": "Bob" },
                "datePublished": "2024-01-15T00:00:00.000Z",
                "articleSection": "Frontend",
                "keywords": "a, b"
            })
        );
        let keys: Vec<&str> = data.as_map().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "@context",
                "@type",
                "headline",
                "alternativeHeadline",
                "author",
                "datePublished",
                "articleSection",
                "keywords"
            ]
        );
    }

    #[test]
    fn disabled_always_yields_none() {
        let config = HeaderConfig {
            structured_data_enabled: false,
            published_at: Some("garbage".into()),
            ..article()
        };

        assert_eq!(generate_structured_data(&config), Ok(None));
        assert_eq!(config.structured_data_lenient(), (None, None));
    }

    #[test]
    fn empty_title_yields_none() {
        let config = HeaderConfig {
            show_placeholder: true,
            ..HeaderConfig::default()
        };

        assert_eq!(generate_structured_data(&config), Ok(None));
    }

    #[test]
    fn minimal_annotation_omits_absent_sources() {
        let data = generate_structured_data(&HeaderConfig::new("A"))
            .expect("generate")
            .expect("enabled");

        assert_eq!(
            data.into_value(),
            json!({ "@context": "https://schema.org", "@type": "Article", "headline": "A" })
        );
    }

    #[test]
    fn overrides_win_key_by_key() {
        let mut config = article();
        config
            .structured_data_overrides
            .insert("headline".into(), json!("X"));
        config
            .structured_data_overrides
            .insert("keywords".into(), json!("override"));
        config
            .structured_data_overrides
            .insert("wordCount".into(), json!(1200));

        let data = generate_structured_data(&config)
            .expect("generate")
            .expect("enabled");

        assert_eq!(data.get("headline"), Some(&json!("X")));
        assert_eq!(data.get("keywords"), Some(&json!("override")));
        assert_eq!(data.get("wordCount"), Some(&json!(1200)));
        assert_eq!(data.get("articleSection"), Some(&json!("Frontend")));
        // Overridden keys keep their schema position.
        assert_eq!(data.as_map().keys().nth(2).map(String::as_str), Some("headline"));
    }

    #[test]
    fn tags_join_into_keywords() {
        let config = HeaderConfig {
            tags: vec!["a".into(), "b".into()],
            ..HeaderConfig::new("A")
        };

        let data = generate_structured_data(&config)
            .expect("generate")
            .expect("enabled");

        assert_eq!(data.get("keywords"), Some(&json!("a, b")));
    }

    #[test]
    fn unparseable_date_fails_strictly_and_drops_leniently() {
        let config = HeaderConfig {
            published_at: Some("someday".into()),
            ..article()
        };

        assert!(generate_structured_data(&config).is_err());
        let (data, error) = config.structured_data_lenient();
        let data = data.expect("enabled");
        assert_eq!(data.get("datePublished"), None);
        assert_eq!(data.get("author"), Some(&json!({ "@type": "Person", "name": "Bob" })));
        assert_eq!(error.map(|err| err.input), Some("someday".to_string()));
    }

    #[test]
    fn script_payload_cannot_close_the_element() {
        let config = HeaderConfig::new("</script><b>hi</b>");

        let payload = generate_structured_data(&config)
            .expect("generate")
            .expect("enabled")
            .to_script_payload();

        assert!(!payload.contains("</"));
        let parsed: Value = serde_json::from_str(&payload).expect("still valid JSON");
        assert_eq!(parsed["headline"], json!("</script><b>hi</b>"));
    }
}

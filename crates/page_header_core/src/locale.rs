//! Locale tables for computed metadata labels and long-form dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Display locale for computed metadata entries.
pub enum HeaderLocale {
    /// English (United States).
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Simplified Chinese.
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl HeaderLocale {
    /// BCP 47 tag, used for the document `lang` attribute.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhCn => "zh-CN",
        }
    }

    /// Parses a BCP 47 tag. Region matching is case-insensitive.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en-us" | "en" => Some(Self::EnUs),
            "zh-cn" | "zh" => Some(Self::ZhCn),
            _ => None,
        }
    }

    pub(crate) const fn published_label(self) -> &'static str {
        match self {
            Self::EnUs => "Published",
            Self::ZhCn => "发布时间",
        }
    }

    pub(crate) const fn author_label(self) -> &'static str {
        match self {
            Self::EnUs => "Author",
            Self::ZhCn => "作者",
        }
    }

    pub(crate) const fn reading_time_label(self) -> &'static str {
        match self {
            Self::EnUs => "Reading time",
            Self::ZhCn => "阅读时长",
        }
    }

    pub(crate) const fn category_label(self) -> &'static str {
        match self {
            Self::EnUs => "Category",
            Self::ZhCn => "分类",
        }
    }

    /// Formats a reading time with its unit suffix.
    pub fn reading_time(self, minutes: u32) -> String {
        match self {
            Self::EnUs => format!("{minutes} minutes"),
            Self::ZhCn => format!("{minutes} 分钟"),
        }
    }

    /// Formats a calendar date in the locale's long form.
    pub fn long_date(self, date: NaiveDate) -> String {
        match self {
            Self::EnUs => date.format("%B %-d, %Y").to_string(),
            Self::ZhCn => date.format("%Y年%m月%d日").to_string(),
        }
    }
}

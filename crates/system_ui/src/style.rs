//! Class-name strategies for the two header styling variants.
//!
//! Both variants render the same markup; a [`HeaderStyleSheet`] only decides which class strings
//! land on each slot.

/// Stylesheet backing the `page-header__*` classes emitted by [`ScopedClasses`].
pub const SCOPED_STYLESHEET: &str = include_str!("../styles/page_header.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Placeholder block drawn while the header is loading.
pub enum SkeletonBlock {
    /// Stands in for the title.
    Title,
    /// Stands in for the subtitle.
    Subtitle,
    /// Stands in for the metadata entry at the given position.
    Meta(usize),
    /// Stands in for the tag at the given position.
    Tag(usize),
}

impl SkeletonBlock {
    /// Blocks drawn in the metadata row.
    pub const META_COUNT: usize = 3;
    /// Blocks drawn in the tag row.
    pub const TAG_COUNT: usize = 2;

    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Meta(_) => "meta",
            Self::Tag(_) => "tag",
        }
    }
}

/// Supplies class strings for every header slot.
///
/// Slots that depend on the appearance receive the resolved `dark` flag.
pub trait HeaderStyleSheet {
    /// `<header>` container. The caller's extra class is appended separately.
    fn container(&self, dark: bool) -> String;
    /// `<h1>` title.
    fn title(&self, dark: bool) -> String;
    /// `<h2>` subtitle.
    fn subtitle(&self, dark: bool) -> String;
    /// Metadata row wrapper.
    fn meta_row(&self, dark: bool) -> String;
    /// One metadata entry.
    fn meta_item(&self) -> &'static str;
    /// Icon wrapper inside an entry.
    fn meta_icon(&self) -> &'static str;
    /// `label:` text inside an entry.
    fn meta_label(&self) -> &'static str;
    /// Value text inside an entry, unless the field carries its own override.
    fn meta_value(&self) -> &'static str;
    /// Tag row wrapper.
    fn tag_row(&self) -> &'static str;
    /// One tag chip.
    fn tag(&self, dark: bool) -> String;
    /// Metadata row wrapper while loading.
    fn skeleton_meta_row(&self) -> &'static str;
    /// Tag row wrapper while loading.
    fn skeleton_tag_row(&self) -> &'static str;
    /// One placeholder block.
    fn skeleton(&self, block: SkeletonBlock) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which [`HeaderStyleSheet`] a header uses.
pub enum HeaderStyleVariant {
    /// Inline utility classes.
    #[default]
    Utility,
    /// Scoped `page-header__*` classes backed by [`SCOPED_STYLESHEET`].
    Scoped,
}

impl HeaderStyleVariant {
    /// Returns the style sheet implementing this variant.
    pub fn sheet(self) -> &'static dyn HeaderStyleSheet {
        match self {
            Self::Utility => &UtilityClasses,
            Self::Scoped => &ScopedClasses,
        }
    }

    /// Stable token for `data-ui-variant` hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Scoped => "scoped",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Utility-class variant.
pub struct UtilityClasses;

const UTILITY_SKELETON: &str = "animate-pulse bg-gray-300 dark:bg-gray-600 rounded";
const UTILITY_META_SKELETON_WIDTHS: [&str; SkeletonBlock::META_COUNT] = ["w-24", "w-20", "w-16"];
const UTILITY_TAG_SKELETON_WIDTHS: [&str; SkeletonBlock::TAG_COUNT] = ["w-16", "w-20"];

impl HeaderStyleSheet for UtilityClasses {
    fn container(&self, dark: bool) -> String {
        let text = if dark { "text-white" } else { "text-gray-900" };
        format!("max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8 sm:py-12 {text}")
    }

    fn title(&self, dark: bool) -> String {
        let text = if dark { "text-white" } else { "text-gray-900" };
        format!("text-3xl sm:text-4xl lg:text-5xl font-bold leading-tight {text} mb-4 sm:mb-6")
    }

    fn subtitle(&self, dark: bool) -> String {
        let text = if dark { "text-gray-300" } else { "text-gray-600" };
        format!("text-lg sm:text-xl lg:text-2xl {text} mb-6 sm:mb-8")
    }

    fn meta_row(&self, dark: bool) -> String {
        let text = if dark { "text-gray-400" } else { "text-gray-500" };
        format!(
            "flex flex-wrap items-center gap-4 sm:gap-6 {text} text-sm sm:text-base mb-6 sm:mb-8"
        )
    }

    fn meta_item(&self) -> &'static str {
        "flex items-center gap-2"
    }

    fn meta_icon(&self) -> &'static str {
        "flex-shrink-0"
    }

    fn meta_label(&self) -> &'static str {
        "font-medium"
    }

    fn meta_value(&self) -> &'static str {
        ""
    }

    fn tag_row(&self) -> &'static str {
        "flex flex-wrap gap-2 sm:gap-3 mb-6 sm:mb-8"
    }

    fn tag(&self, dark: bool) -> String {
        let palette = if dark {
            "bg-gray-700 text-gray-300 hover:bg-gray-600"
        } else {
            "bg-gray-100 text-gray-700 hover:bg-gray-200"
        };
        format!(
            "px-3 py-1 rounded-full text-xs sm:text-sm font-medium {palette} \
             transition-colors duration-200"
        )
    }

    fn skeleton_meta_row(&self) -> &'static str {
        "flex flex-wrap gap-4 mb-6"
    }

    fn skeleton_tag_row(&self) -> &'static str {
        "flex flex-wrap gap-2"
    }

    fn skeleton(&self, block: SkeletonBlock) -> String {
        let shape = match block {
            SkeletonBlock::Title => "h-12 w-3/4 mb-4".to_string(),
            SkeletonBlock::Subtitle => "h-6 w-1/2 mb-6".to_string(),
            SkeletonBlock::Meta(index) => {
                format!("h-4 {}", cycle(&UTILITY_META_SKELETON_WIDTHS, index))
            }
            SkeletonBlock::Tag(index) => {
                format!("h-6 {} rounded-full", cycle(&UTILITY_TAG_SKELETON_WIDTHS, index))
            }
        };
        format!("{UTILITY_SKELETON} {shape}")
    }
}

fn cycle(widths: &[&'static str], index: usize) -> &'static str {
    widths[index % widths.len()]
}

#[derive(Debug, Clone, Copy, Default)]
/// Scoped-stylesheet variant.
pub struct ScopedClasses;

fn scoped(element: &str, dark: bool) -> String {
    let modifier = if dark { "dark" } else { "light" };
    format!("page-header__{element} page-header__{element}--{modifier}")
}

impl HeaderStyleSheet for ScopedClasses {
    fn container(&self, dark: bool) -> String {
        let modifier = if dark { "dark" } else { "light" };
        format!("page-header page-header--{modifier}")
    }

    fn title(&self, dark: bool) -> String {
        scoped("title", dark)
    }

    fn subtitle(&self, dark: bool) -> String {
        scoped("subtitle", dark)
    }

    fn meta_row(&self, dark: bool) -> String {
        scoped("meta", dark)
    }

    fn meta_item(&self) -> &'static str {
        "page-header__meta-item"
    }

    fn meta_icon(&self) -> &'static str {
        "page-header__meta-icon"
    }

    fn meta_label(&self) -> &'static str {
        "page-header__meta-label"
    }

    fn meta_value(&self) -> &'static str {
        "page-header__meta-value"
    }

    fn tag_row(&self) -> &'static str {
        "page-header__tags"
    }

    fn tag(&self, dark: bool) -> String {
        scoped("tag", dark)
    }

    fn skeleton_meta_row(&self) -> &'static str {
        "page-header__meta"
    }

    fn skeleton_tag_row(&self) -> &'static str {
        "page-header__tags"
    }

    fn skeleton(&self, block: SkeletonBlock) -> String {
        format!(
            "page-header__skeleton page-header__skeleton--{}",
            block.token()
        )
    }
}

/// Appends a caller class to a slot's classes, skipping blank extras.
pub(crate) fn join_classes(base: String, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        base
    } else {
        format!("{base} {extra}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VARIANTS: [HeaderStyleVariant; 2] =
        [HeaderStyleVariant::Utility, HeaderStyleVariant::Scoped];

    fn appearance_slots(sheet: &dyn HeaderStyleSheet, dark: bool) -> Vec<String> {
        vec![
            sheet.container(dark),
            sheet.title(dark),
            sheet.subtitle(dark),
            sheet.meta_row(dark),
            sheet.tag(dark),
        ]
    }

    #[test]
    fn every_slot_has_classes_in_both_variants() {
        for variant in VARIANTS {
            let sheet = variant.sheet();
            for dark in [false, true] {
                assert!(appearance_slots(sheet, dark).iter().all(|class| !class.is_empty()));
            }
            for class in [
                sheet.meta_item(),
                sheet.meta_icon(),
                sheet.meta_label(),
                sheet.tag_row(),
                sheet.skeleton_meta_row(),
                sheet.skeleton_tag_row(),
            ] {
                assert!(!class.is_empty(), "{} slot is empty", variant.token());
            }
        }
    }

    #[test]
    fn appearance_changes_every_dependent_slot() {
        for variant in VARIANTS {
            let sheet = variant.sheet();
            let light = appearance_slots(sheet, false);
            let dark = appearance_slots(sheet, true);
            for (light, dark) in light.iter().zip(&dark) {
                assert_ne!(light, dark);
            }
        }
    }

    #[test]
    fn utility_classes_follow_dark_flag() {
        let sheet = UtilityClasses;

        assert!(sheet.title(true).contains("text-white"));
        assert!(sheet.title(false).contains("text-gray-900"));
        assert!(sheet.subtitle(true).contains("text-gray-300"));
        assert!(sheet.tag(false).contains("bg-gray-100"));
    }

    #[test]
    fn scoped_classes_use_modifiers() {
        let sheet = ScopedClasses;

        assert_eq!(sheet.container(true), "page-header page-header--dark");
        assert_eq!(
            sheet.title(false),
            "page-header__title page-header__title--light"
        );
        assert_eq!(
            sheet.skeleton(SkeletonBlock::Meta(2)),
            "page-header__skeleton page-header__skeleton--meta"
        );
        for class in ["page-header__title--dark", "page-header__skeleton--tag"] {
            assert!(SCOPED_STYLESHEET.contains(class), "stylesheet misses {class}");
        }
    }

    #[test]
    fn utility_skeleton_widths_cycle_by_position() {
        let sheet = UtilityClasses;

        assert!(sheet.skeleton(SkeletonBlock::Meta(0)).ends_with("h-4 w-24"));
        assert!(sheet.skeleton(SkeletonBlock::Meta(2)).ends_with("h-4 w-16"));
        assert!(sheet.skeleton(SkeletonBlock::Tag(1)).ends_with("h-6 w-20 rounded-full"));
        assert!(sheet.skeleton(SkeletonBlock::Title).starts_with(UTILITY_SKELETON));
    }

    #[test]
    fn extra_classes_append_only_when_present() {
        assert_eq!(join_classes("a b".into(), ""), "a b");
        assert_eq!(join_classes("a b".into(), "  "), "a b");
        assert_eq!(join_classes("a".into(), " article-top "), "a article-top");
    }
}

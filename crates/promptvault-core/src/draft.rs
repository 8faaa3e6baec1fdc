//! Input validation for create and edit requests.
//!
//! The ledger trusts its inputs, so every user-facing entry point builds an
//! [`AssetDraft`] and validates it before touching an asset.

use crate::asset::{Asset, AssetKind};

/// Category assigned when the user leaves the field blank.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Category suggestions offered when creating an asset.
pub const INITIAL_CATEGORIES: &[&str] = &[
    "Writing Assistant",
    "Coding",
    "Image Generation",
    "Data Analysis",
    "Creative Writing",
    "Business",
    "Education",
];

/// User-supplied fields for a new asset or a new version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDraft {
    /// Prompt or idea (ignored on edit)
    pub kind: AssetKind,
    /// Title, required
    pub title: String,
    /// Category, defaulted when blank
    pub category: String,
    /// Normalized hashtags
    pub tags: Vec<String>,
    /// Body text, required
    pub content: String,
}

impl AssetDraft {
    /// Start a draft with the given kind, title and content.
    #[must_use]
    pub fn new(kind: AssetKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            category: String::new(),
            tags: Vec::new(),
            content: content.into(),
        }
    }

    /// Prefill a draft from an existing asset, as the edit form does.
    #[must_use]
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            kind: asset.kind,
            title: asset.title.clone(),
            category: asset.category.clone(),
            tags: asset.tags.clone(),
            content: asset.content().to_string(),
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set tags from comma-separated text (see [`parse_tags`]).
    #[must_use]
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = parse_tags(tags);
        self
    }

    /// Check required fields and fill defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank title or empty
    /// content.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.content.is_empty() {
            return Err(ValidationError::MissingField("content"));
        }

        self.title = self.title.trim().to_string();
        let category = self.category.trim();
        self.category = if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.to_string()
        };
        self.tags = normalize_tags(self.tags.iter().map(String::as_str));
        Ok(self)
    }

    /// Copy the descriptive fields onto `asset`. Content is left alone.
    pub fn apply_metadata(&self, asset: &mut Asset) {
        asset.title.clone_from(&self.title);
        asset.category.clone_from(&self.category);
        asset.tags.clone_from(&self.tags);
    }
}

/// Check the changelog that must accompany every edit.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] if `changelog` is blank.
pub fn validate_changelog(changelog: &str) -> Result<&str, ValidationError> {
    let trimmed = changelog.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("changelog"));
    }
    Ok(trimmed)
}

/// Parse comma-separated tag text into `#`-prefixed, de-duplicated tags.
///
/// `"v1, #draft,, v1"` becomes `["#v1", "#draft"]`.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    normalize_tags(text.split(','))
}

/// `existing` followed by each suggested tag not already present.
///
/// Both lists go through the same trimming, `#` prefixing and
/// de-duplication as [`parse_tags`].
#[must_use]
pub fn merge_tags(existing: &[String], suggested: &[String]) -> Vec<String> {
    normalize_tags(existing.iter().chain(suggested).map(String::as_str))
}

fn normalize_tags<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.map(str::trim).filter(|t| !t.is_empty()) {
        let tag = if tag.starts_with('#') {
            tag.to_string()
        } else {
            format!("#{tag}")
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// A required field was missing from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Named field is empty
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_prefixed_and_deduplicated() {
        assert_eq!(parse_tags("v1, #draft,, v1 ,#v1"), ["#v1", "#draft"]);
        assert!(parse_tags("  , ").is_empty());
    }

    #[test]
    fn merged_tags_keep_existing_order_and_skip_repeats() {
        let existing = parse_tags("React, v1");
        let suggested: Vec<String> = ["React", "#v1", "Hooks", " "]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(merge_tags(&existing, &suggested), ["#React", "#v1", "#Hooks"]);
        assert_eq!(merge_tags(&[], &suggested), ["#React", "#v1", "#Hooks"]);
    }

    #[test]
    fn blank_category_gets_default() {
        let draft = AssetDraft::new(AssetKind::Prompt, " Reviewer ", "Review this code")
            .validate()
            .unwrap();
        assert_eq!(draft.category, DEFAULT_CATEGORY);
        assert_eq!(draft.title, "Reviewer");
    }

    #[test]
    fn missing_title_or_content_is_rejected() {
        let err = AssetDraft::new(AssetKind::Idea, "  ", "body")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title"));

        let err = AssetDraft::new(AssetKind::Idea, "Title", "")
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "content is required");
    }

    #[test]
    fn changelog_must_not_be_blank() {
        assert_eq!(validate_changelog("  fix typo "), Ok("fix typo"));
        assert!(validate_changelog(" \t").is_err());
    }

    #[test]
    fn apply_metadata_leaves_history_untouched() {
        let mut asset = Asset::create("P-001", AssetKind::Prompt, "A", "init", chrono::Utc::now());
        let draft = AssetDraft::new(AssetKind::Prompt, "New title", "ignored")
            .with_category("Coding")
            .with_tags("rust, cli")
            .validate()
            .unwrap();

        draft.apply_metadata(&mut asset);
        assert_eq!(asset.title, "New title");
        assert_eq!(asset.tags, ["#rust", "#cli"]);
        assert_eq!(asset.content(), "A");
        assert_eq!(asset.versions().len(), 1);
    }
}

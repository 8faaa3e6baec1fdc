//! Filtering, search and sorting over a collection of assets.

use crate::asset::{Asset, AssetKind};
use std::cmp::Ordering;
use std::str::FromStr;

/// Which asset kinds to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetFilter {
    /// Every asset
    #[default]
    All,
    /// Prompts only
    Prompts,
    /// Ideas only
    Ideas,
}

impl AssetFilter {
    fn matches(self, kind: AssetKind) -> bool {
        match self {
            AssetFilter::All => true,
            AssetFilter::Prompts => kind == AssetKind::Prompt,
            AssetFilter::Ideas => kind == AssetKind::Idea,
        }
    }
}

impl FromStr for AssetFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(AssetFilter::All),
            "prompts" | "prompt" => Ok(AssetFilter::Prompts),
            "ideas" | "idea" => Ok(AssetFilter::Ideas),
            _ => Err(CatalogError::UnknownFilter(s.to_string())),
        }
    }
}

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Last modification time
    #[default]
    UpdatedAt,
    /// Creation time
    CreatedAt,
    /// Title, case-insensitive
    Title,
}

impl FromStr for SortField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "updatedAt" | "updated" => Ok(SortField::UpdatedAt),
            "createdAt" | "created" => Ok(SortField::CreatedAt),
            "title" => Ok(SortField::Title),
            _ => Err(CatalogError::UnknownSortField(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

/// Sort field and direction. Defaults to most recently updated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOption {
    /// Field to compare
    pub field: SortField,
    /// Ordering direction
    pub direction: SortDirection,
}

impl SortOption {
    fn compare(self, a: &Asset, b: &Asset) -> Ordering {
        let ord = match self.field {
            SortField::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// A catalog view: kind filter, free-text search and sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Kind filter
    pub filter: AssetFilter,
    /// Case-insensitive substring matched against title, tags and id
    pub search: String,
    /// Result ordering
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Whether `asset` passes the filter and search.
    #[must_use]
    pub fn matches(&self, asset: &Asset) -> bool {
        if !self.filter.matches(asset.kind) {
            return false;
        }

        let needle = self.search.to_lowercase();
        needle.is_empty()
            || asset.title.to_lowercase().contains(&needle)
            || asset.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            || asset.id.to_lowercase().contains(&needle)
    }

    /// Matching assets in display order. Ties keep collection order.
    #[must_use]
    pub fn apply<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        let mut shown: Vec<&Asset> = assets.iter().filter(|a| self.matches(a)).collect();
        shown.sort_by(|a, b| self.sort.compare(a, b));
        shown
    }
}

/// Errors parsing catalog options from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Unrecognized filter name
    #[error("unknown filter: {0:?} (expected all, prompts or ideas)")]
    UnknownFilter(String),
    /// Unrecognized sort field
    #[error("unknown sort field: {0:?} (expected updatedAt, createdAt or title)")]
    UnknownSortField(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn asset(id: &str, kind: AssetKind, title: &str, tags: &[&str], created: i64) -> Asset {
        let mut asset = Asset::create(id, kind, "body", "init", t(created));
        asset.title = title.to_string();
        asset.tags = tags.iter().map(ToString::to_string).collect();
        asset
    }

    fn sample() -> Vec<Asset> {
        let mut translator = asset("P-001", AssetKind::Prompt, "Translator", &["#Translation"], 0);
        translator.append_version("body v2", "edit", t(500));
        vec![
            translator,
            asset("I-001", AssetKind::Idea, "React generator", &["#React"], 100),
            asset("P-002", AssetKind::Prompt, "code reviewer", &["#Rust"], 200),
        ]
    }

    fn ids<'a>(assets: &[&'a Asset]) -> Vec<&'a str> {
        assets.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn default_query_sorts_by_last_update() {
        let assets = sample();
        let shown = CatalogQuery::default().apply(&assets);
        assert_eq!(ids(&shown), ["P-001", "P-002", "I-001"]);
    }

    #[test]
    fn filter_by_kind() {
        let assets = sample();
        let query = CatalogQuery {
            filter: AssetFilter::Ideas,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&assets)), ["I-001"]);
    }

    #[test]
    fn search_matches_title_tags_and_id_case_insensitively() {
        let assets = sample();
        let search = |needle: &str| {
            let query = CatalogQuery {
                search: needle.to_string(),
                ..CatalogQuery::default()
            };
            ids(&query.apply(&assets))
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        assert_eq!(search("REACT"), ["I-001"]);
        assert_eq!(search("#rust"), ["P-002"]);
        assert_eq!(search("p-00"), ["P-001", "P-002"]);
        assert!(search("nothing").is_empty());
    }

    #[test]
    fn sort_by_title_ascending_ignores_case() {
        let assets = sample();
        let query = CatalogQuery {
            sort: SortOption {
                field: SortField::Title,
                direction: SortDirection::Asc,
            },
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&assets)), ["P-002", "I-001", "P-001"]);
    }

    #[test]
    fn sort_by_creation_oldest_first() {
        let assets = sample();
        let query = CatalogQuery {
            sort: SortOption {
                field: SortField::CreatedAt,
                direction: SortDirection::Asc,
            },
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&assets)), ["P-001", "I-001", "P-002"]);
    }

    #[test]
    fn parses_cli_names() {
        assert_eq!("Prompts".parse::<AssetFilter>(), Ok(AssetFilter::Prompts));
        assert_eq!("title".parse::<SortField>(), Ok(SortField::Title));
        assert!("size".parse::<SortField>().is_err());
    }
}

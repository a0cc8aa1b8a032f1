use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One catalog record. `filename` doubles as the content-store key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub filename: String,
    /// Publication date in `DD.MM.YY` form, as stored in the catalog file.
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stable URL slug. Older catalogs do not carry one; a slug derived
    /// from the title is used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Article {
    /// Display title: the filename without its markup extension.
    pub fn title(&self) -> &str {
        match self.filename.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => &self.filename,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d.%m.%y").ok()
    }

    /// Slug used for fragment encoding and lookup: the explicit catalog
    /// slug when present, else the title with spaces turned into hyphens.
    pub fn slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => self.title().replace(' ', "-"),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// In-memory article catalog, sorted newest-first once at load time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: Vec<Article>,
}

impl Catalog {
    /// Builds a catalog from raw records, sorting by date descending.
    /// The sort is stable, so records sharing a date keep their catalog
    /// order. Records with an unparseable date sink to the end.
    pub fn from_records(mut records: Vec<Article>) -> Self {
        records.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
        Self { articles: records }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    pub fn get(&self, filename: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.filename == filename)
    }

    /// Case-insensitive slug lookup, used by the router.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Article> {
        let wanted = slug.to_lowercase();
        self.articles
            .iter()
            .find(|a| a.slug().to_lowercase() == wanted)
    }

    /// Distinct tags across the catalog, lexicographically ascending.
    pub fn tag_index(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .articles
            .iter()
            .flat_map(|a| a.tags.iter().map(String::as_str))
            .collect();
        set.into_iter().map(ToOwned::to_owned).collect()
    }

    /// Articles passing the active filters, in catalog (newest-first)
    /// order. An article is visible iff it carries the active tag (or no
    /// tag is active) and its lowercased title contains the lowercased
    /// search term (or the term is empty). Search matches titles only.
    pub fn visible(&self, active_tag: Option<&str>, search_term: &str) -> Vec<&Article> {
        let needle = search_term.to_lowercase();
        self.articles
            .iter()
            .filter(|a| match active_tag {
                Some(tag) => a.has_tag(tag),
                None => true,
            })
            .filter(|a| needle.is_empty() || a.title().to_lowercase().contains(&needle))
            .collect()
    }
}

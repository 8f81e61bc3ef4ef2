use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language, selected by the `lang` query parameter (`zh` default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl FromStr for Lang {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "zh" => Ok(Lang::Zh),
            "en" => Ok(Lang::En),
            other => Err(crate::Error::Parse(format!("unknown language: {}", other))),
        }
    }
}

/// One curated article record. Every field except `link` is optional on the
/// wire; readers must tolerate missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_zh: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_quote_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_quote_zh: Option<String>,
}

impl Item {
    pub fn new(link: impl Into<String>, title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            id: None,
            title: title.into(),
            title_zh: None,
            source: source.into(),
            date: None,
            tags: Vec::new(),
            tags_zh: None,
            summary_en: None,
            summary_zh: None,
            best_quote_en: None,
            best_quote_zh: None,
        }
    }

    /// Title in the requested language, falling back to the default title.
    pub fn localized_title(&self, lang: Lang) -> &str {
        match lang {
            Lang::Zh => self.title_zh.as_deref().unwrap_or(&self.title),
            Lang::En => &self.title,
        }
    }

    /// Language-specific summary; absent or empty resolves to `None`.
    pub fn localized_summary(&self, lang: Lang) -> Option<&str> {
        let field = match lang {
            Lang::Zh => self.summary_zh.as_deref(),
            Lang::En => self.summary_en.as_deref(),
        };
        field.filter(|s| !s.is_empty())
    }

    /// Language-specific quote; absent or empty resolves to `None`.
    pub fn localized_quote(&self, lang: Lang) -> Option<&str> {
        let field = match lang {
            Lang::Zh => self.best_quote_zh.as_deref(),
            Lang::En => self.best_quote_en.as_deref(),
        };
        field.filter(|s| !s.is_empty())
    }

    /// Tag list in the requested language, falling back to the default list.
    pub fn localized_tags(&self, lang: Lang) -> &[String] {
        match lang {
            Lang::Zh => self.tags_zh.as_deref().unwrap_or(&self.tags),
            Lang::En => &self.tags,
        }
    }

    /// Identity string persisted after a recommendation (id when the record
    /// carries one, otherwise the title).
    pub fn pick_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }

    /// Merge an enrichment digest into this item. Digest fields override only
    /// when present and non-empty; tags become the dedup union with the
    /// existing list first.
    pub fn merge_digest(&mut self, digest: Digest) {
        merge_field(&mut self.summary_en, digest.summary_en);
        merge_field(&mut self.summary_zh, digest.summary_zh);
        merge_field(&mut self.best_quote_en, digest.best_quote_en);
        merge_field(&mut self.best_quote_zh, digest.best_quote_zh);

        if !digest.tags.is_empty() {
            let mut seen: HashSet<String> = self.tags.iter().cloned().collect();
            for tag in digest.tags {
                if seen.insert(tag.clone()) {
                    self.tags.push(tag);
                }
            }
        }
    }
}

fn merge_field(existing: &mut Option<String>, incoming: Option<String>) {
    if let Some(value) = incoming.filter(|v| !v.is_empty()) {
        *existing = Some(value);
    }
}

/// Structured digest returned by the enrichment model for one article. The
/// prompt tells the model to use `null` for any field it is unsure about,
/// so `tags: null` must parse like an absent list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    #[serde(default)]
    pub summary_en: Option<String>,
    #[serde(default)]
    pub summary_zh: Option<String>,
    #[serde(default)]
    pub best_quote_en: Option<String>,
    #[serde(default)]
    pub best_quote_zh: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub tags: Vec<String>,
}

fn null_as_empty_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tags = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default())
}

impl Digest {
    pub fn is_empty(&self) -> bool {
        self.summary_en.is_none()
            && self.summary_zh.is_none()
            && self.best_quote_en.is_none()
            && self.best_quote_zh.is_none()
            && self.tags.is_empty()
    }
}

/// De-duplicate a dataset by `link`, first occurrence wins. Items without a
/// link are dropped.
pub fn dedup_by_link(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.link.is_empty() && seen.insert(item.link.clone()))
        .collect()
}

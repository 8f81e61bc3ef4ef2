use std::collections::BTreeSet;
use std::str::FromStr;

use gems_core::{Error, Lang, Result};

/// The `all` sentinel chip value: disables a facet filter entirely.
pub const ALL: &str = "all";

/// Active values for one facet. An empty set is the `all` sentinel, meaning
/// no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    active: BTreeSet<String>,
}

impl FacetSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.active.is_empty()
    }

    /// Multi-select semantics: clicking `all` clears every selection;
    /// clicking a value toggles its membership. Deselecting the last
    /// specific value reverts to `all` by construction.
    pub fn toggle(&mut self, value: &str) {
        if value == ALL {
            self.active.clear();
        } else if !self.active.remove(value) {
            self.active.insert(value.to_string());
        }
    }

    /// Single-select semantics: last clicked wins, `all` clears.
    pub fn select(&mut self, value: &str) {
        self.active.clear();
        if value != ALL {
            self.active.insert(value.to_string());
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        self.active.is_empty() || self.active.contains(value)
    }

    /// True when the selection is `all` or any of the given values is active.
    pub fn allows_any<'a>(&self, values: impl IntoIterator<Item = &'a str>) -> bool {
        self.active.is_empty() || values.into_iter().any(|v| self.active.contains(v))
    }

    /// Active-state for a chip, including the `all` chip itself.
    pub fn is_active(&self, value: &str) -> bool {
        if value == ALL {
            self.active.is_empty()
        } else {
            self.active.contains(value)
        }
    }
}

/// Which click semantics facet chips use. The historical page snapshots
/// differ here; it is a configuration flag, not a separate code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetMode {
    Single,
    #[default]
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Sort specification, parsed from the `<key>-<dir>` form the sort dropdown
/// uses (`date-desc`, `title-asc`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self { key: SortKey::Date, dir: SortDir::Desc }
    }
}

impl FromStr for SortSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, dir) = s
            .split_once('-')
            .ok_or_else(|| Error::Parse(format!("invalid sort spec: {}", s)))?;
        let key = match key {
            "date" => SortKey::Date,
            "title" => SortKey::Title,
            other => return Err(Error::Parse(format!("unknown sort key: {}", other))),
        };
        let dir = match dir {
            "asc" => SortDir::Asc,
            "desc" => SortDir::Desc,
            other => return Err(Error::Parse(format!("unknown sort direction: {}", other))),
        };
        Ok(Self { key, dir })
    }
}

/// The whole per-session display state, passed explicitly into the pure
/// filter and render functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub sources: FacetSelection,
    pub tags: FacetSelection,
    pub sort: SortSpec,
    pub lang: Lang,
    pub facet_mode: FacetMode,
}

impl FilterState {
    pub fn new(lang: Lang) -> Self {
        Self { lang, ..Self::default() }
    }

    /// Apply a click on a source chip according to the configured mode.
    pub fn click_source(&mut self, value: &str) {
        match self.facet_mode {
            FacetMode::Single => self.sources.select(value),
            FacetMode::Multi => self.sources.toggle(value),
        }
    }

    /// Apply a click on a tag chip according to the configured mode.
    pub fn click_tag(&mut self, value: &str) {
        match self.facet_mode {
            FacetMode::Single => self.tags.select(value),
            FacetMode::Multi => self.tags.toggle(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut sel = FacetSelection::all();
        sel.toggle("rss");
        let snapshot = sel.clone();
        sel.toggle("blog");
        sel.toggle("blog");
        assert_eq!(sel, snapshot);
    }

    #[test]
    fn test_toggle_all_clears_selection() {
        let mut sel = FacetSelection::all();
        sel.toggle("rss");
        sel.toggle("blog");
        sel.toggle(ALL);
        assert!(sel.is_all());
        assert!(sel.allows("anything"));
    }

    #[test]
    fn test_deselecting_last_value_reverts_to_all() {
        let mut sel = FacetSelection::all();
        sel.toggle("rss");
        sel.toggle("rss");
        assert!(sel.is_all());
        assert!(sel.is_active(ALL));
    }

    #[test]
    fn test_single_select_last_click_wins() {
        let mut state = FilterState { facet_mode: FacetMode::Single, ..FilterState::default() };
        state.click_source("rss");
        state.click_source("blog");
        assert!(!state.sources.is_active("rss"));
        assert!(state.sources.is_active("blog"));
    }

    #[test]
    fn test_allows_any() {
        let mut sel = FacetSelection::all();
        sel.toggle("psychology");
        assert!(sel.allows_any(["decision", "psychology"].into_iter()));
        assert!(!sel.allows_any(["decision"].into_iter()));
        assert!(FacetSelection::all().allows_any(std::iter::empty()));
    }

    #[test]
    fn test_sort_spec_parsing() {
        let spec: SortSpec = "title-asc".parse().unwrap();
        assert_eq!(spec, SortSpec { key: SortKey::Title, dir: SortDir::Asc });
        assert!("rating-desc".parse::<SortSpec>().is_err());
        assert!("date".parse::<SortSpec>().is_err());
    }
}

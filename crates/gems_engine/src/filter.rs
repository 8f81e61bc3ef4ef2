use std::cmp::Ordering;

use gems_core::{dates, Item};

use crate::state::{FilterState, SortDir, SortKey};

/// Compute the visible subset of the dataset for the current display state,
/// in sorted order. Pure: the same inputs always yield the same output, so
/// it is safe to re-run on every keystroke.
pub fn visible<'a>(items: &'a [Item], state: &FilterState) -> Vec<&'a Item> {
    let query = state.query.trim().to_lowercase();

    let mut view: Vec<&Item> = items
        .iter()
        .filter(|item| matches_query(item, state, &query) && matches_facets(item, state))
        .collect();

    // Stable sort with the link as explicit secondary key, so equal dates or
    // titles keep a defined order.
    view.sort_by(|a, b| {
        let ord = match state.sort.key {
            SortKey::Date => {
                let da = a.date.as_deref().map(dates::parse_date_epoch).unwrap_or(0);
                let db = b.date.as_deref().map(dates::parse_date_epoch).unwrap_or(0);
                da.cmp(&db)
            }
            SortKey::Title => a.localized_title(state.lang).cmp(b.localized_title(state.lang)),
        };
        let ord = match state.sort.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        };
        match ord {
            Ordering::Equal => a.link.cmp(&b.link),
            other => other,
        }
    });

    view
}

/// Case-insensitive substring search over localized title, summary, quote
/// and every localized tag. An empty query matches everything.
fn matches_query(item: &Item, state: &FilterState, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let lang = state.lang;

    item.localized_title(lang).to_lowercase().contains(query)
        || item
            .localized_summary(lang)
            .is_some_and(|s| s.to_lowercase().contains(query))
        || item
            .localized_quote(lang)
            .is_some_and(|q| q.to_lowercase().contains(query))
        || item
            .localized_tags(lang)
            .iter()
            .any(|t| t.to_lowercase().contains(query))
}

/// AND across facets, OR within a facet's multi-selection.
fn matches_facets(item: &Item, state: &FilterState) -> bool {
    state.sources.allows(&item.source)
        && state
            .tags
            .allows_any(item.localized_tags(state.lang).iter().map(String::as_str))
}

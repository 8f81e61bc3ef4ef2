use gems_engine::state::ALL;
use gems_engine::{FacetCount, FacetSelection};

use crate::escape::escape;

/// Render one facet's chip row, starting with the `all` sentinel chip.
/// Active state reflects the current selection; counts are optional since
/// the earlier page variants did not show them.
pub fn render_chips(
    facets: &[FacetCount],
    selection: &FacetSelection,
    data_attr: &str,
    show_counts: bool,
) -> String {
    let mut out = String::from("<div class=\"tags\">\n");
    out.push_str(&chip(ALL, None, selection.is_active(ALL), data_attr));
    for facet in facets {
        let count = show_counts.then_some(facet.count);
        out.push_str(&chip(&facet.value, count, selection.is_active(&facet.value), data_attr));
    }
    out.push_str("</div>\n");
    out
}

fn chip(value: &str, count: Option<usize>, active: bool, data_attr: &str) -> String {
    let class = if active { "tag active" } else { "tag" };
    let label = match count {
        Some(n) => format!("{} ({})", escape(value), n),
        None => escape(value),
    };
    format!(
        "  <span class=\"{}\" data-{}=\"{}\">{}</span>\n",
        class,
        data_attr,
        escape(value),
        label
    )
}

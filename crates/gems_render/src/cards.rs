use gems_core::{Item, Lang};

use crate::escape::escape;

/// Pure view-model for one card: everything already localized, nothing
/// escaped yet. Markup generation is a separate concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub link: String,
    pub title: String,
    pub summary: Option<String>,
    pub summary_label: &'static str,
    pub quote: Option<String>,
    pub quote_glyphs: (char, char),
    pub source: String,
    pub tags: String,
    pub date: String,
}

impl CardView {
    pub fn from_item(item: &Item, lang: Lang) -> Self {
        let (summary_label, quote_glyphs) = match lang {
            Lang::Zh => ("AI总结：", ('「', '」')),
            Lang::En => ("AI Summary: ", ('“', '”')),
        };
        Self {
            link: item.link.clone(),
            title: item.localized_title(lang).to_string(),
            summary: item.localized_summary(lang).map(str::to_string),
            summary_label,
            quote: item.localized_quote(lang).map(str::to_string),
            quote_glyphs,
            source: item.source.clone(),
            tags: item.localized_tags(lang).join(", "),
            date: item.date.clone().unwrap_or_default(),
        }
    }
}

/// Render one card. Summary and quote blocks are omitted entirely when the
/// localized field is absent or empty.
pub fn render_card(view: &CardView) -> String {
    let mut out = String::new();
    out.push_str("<article class=\"card\">\n");
    out.push_str(&format!(
        "  <h3><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></h3>\n",
        escape(&view.link),
        escape(&view.title)
    ));

    if let Some(summary) = &view.summary {
        out.push_str(&format!(
            "  <p><span class=\"ai-label\">{}</span>{}</p>\n",
            escape(view.summary_label),
            escape(summary)
        ));
    }

    if let Some(quote) = &view.quote {
        out.push_str(&format!(
            "  <blockquote>{}{}{}</blockquote>\n",
            view.quote_glyphs.0,
            escape(quote),
            view.quote_glyphs.1
        ));
    }

    out.push_str(&format!(
        "  <div class=\"meta\">{} · {} · {}</div>\n",
        escape(&view.source),
        escape(&view.tags),
        escape(&view.date)
    ));
    out.push_str("</article>\n");
    out
}

/// Render the visible list in order. Idempotent: equal inputs produce
/// byte-identical markup.
pub fn render_cards(items: &[&Item], lang: Lang) -> String {
    items
        .iter()
        .map(|item| render_card(&CardView::from_item(item, lang)))
        .collect()
}

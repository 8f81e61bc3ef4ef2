use gems_core::Lang;

/// Why the list area is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The dataset itself has no items.
    NoContent,
    /// Active filters matched nothing.
    NoMatches,
    /// The loader failed; rendering was aborted.
    LoadFailed,
}

/// Localized empty-state markup shown instead of the card list.
pub fn render_empty(lang: Lang, reason: EmptyReason) -> String {
    let text = match (lang, reason) {
        (Lang::Zh, EmptyReason::NoContent) => "暂无内容",
        (Lang::Zh, EmptyReason::NoMatches) => "没有匹配的结果，试试换个关键词或来源。",
        (Lang::Zh, EmptyReason::LoadFailed) => "数据加载失败，请稍后再试。",
        (Lang::En, EmptyReason::NoContent) => "No content available",
        (Lang::En, EmptyReason::NoMatches) => "No matching results, try different keywords or sources.",
        (Lang::En, EmptyReason::LoadFailed) => "Failed to load data, please try again later.",
    };
    format!("<p id=\"empty\">{}</p>\n", text)
}

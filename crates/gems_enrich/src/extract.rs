use scraper::Html;

/// Default excerpt budget sent to the model, in characters.
pub const DEFAULT_EXCERPT_BUDGET: usize = 9000;

/// Reduce an article page to a bounded plain-text excerpt: script and style
/// content is dropped, remaining text is whitespace-collapsed and truncated
/// to `budget` characters.
pub fn extract_text(html: &str, budget: usize) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    for node in document.tree.nodes() {
        if let Some(text) = node.value().as_text() {
            let in_skipped = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|el| matches!(el.name(), "script" | "style"))
            });
            if !in_skipped {
                raw.push_str(text);
                raw.push(' ');
            }
        }
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, budget)
}

fn truncate_chars(s: &str, budget: usize) -> String {
    match s.char_indices().nth(budget) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_and_style() {
        let html = "<html><head><style>.a{color:red}</style></head>\
                    <body><script>var x = 1;</script><p>Hello  world</p></body></html>";
        assert_eq!(extract_text(html, 100), "Hello world");
    }

    #[test]
    fn test_collapses_whitespace_across_tags() {
        let html = "<div><p>one</p>\n\n<p>two\t three</p></div>";
        assert_eq!(extract_text(html, 100), "one two three");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let html = "<p>深度工作的价值</p>";
        let out = extract_text(html, 4);
        assert_eq!(out, "深度工作");
    }

    #[test]
    fn test_budget_larger_than_text() {
        assert_eq!(extract_text("<p>short</p>", 9000), "short");
    }
}

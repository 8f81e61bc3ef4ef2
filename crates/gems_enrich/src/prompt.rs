/// System message: the model must answer with bare JSON.
pub const SYSTEM_PROMPT: &str =
    "You are a precise research assistant. Produce JSON only, no commentary.";

/// User prompt demanding the strict digest object for one article.
pub fn build_user_prompt(title: &str, url: &str, excerpt: &str) -> String {
    format!(
        "Read the article below and return a compact, factual digest for a Chinese audience.\n\
         \n\
         Return a strict JSON object with keys:\n\
         - summary_en: 80–120 words\n\
         - summary_zh: 80–120 chars Chinese summary (natural Chinese, not a literal translation)\n\
         - best_quote_en: one verbatim sentence (<= 180 chars) copied from the article\n\
         - best_quote_zh: faithful Chinese translation of best_quote_en\n\
         - tags: 2–4 short Chinese/English tags (e.g., [\"psychology\",\"decision\"])\n\
         \n\
         Rules:\n\
         - If unsure, use null for that field.\n\
         - Do NOT fabricate quotes; the quote must be an exact substring of the article.\n\
         - Keep JSON valid. Do not wrap in code fences.\n\
         \n\
         Article Title: {title}\n\
         Article URL: {url}\n\
         Article Excerpt (may be truncated):\n\
         {excerpt}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_every_digest_key() {
        let prompt = build_user_prompt("T", "http://u", "body text");
        for key in ["summary_en", "summary_zh", "best_quote_en", "best_quote_zh", "tags"] {
            assert!(prompt.contains(key), "missing key {}", key);
        }
        assert!(prompt.contains("Article Title: T"));
        assert!(prompt.contains("body text"));
    }
}

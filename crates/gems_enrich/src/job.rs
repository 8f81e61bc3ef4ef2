use std::path::PathBuf;
use std::time::Duration;

use gems_core::{dedup_by_link, Digest, Item, Result};
use gems_store::{read_dataset, write_dataset};
use serde::Deserialize;
use tracing::{info, warn};

use crate::extract::{extract_text, DEFAULT_EXCERPT_BUDGET};
use crate::fetch::PageFetcher;
use crate::openrouter::DigestModel;

/// One entry of `sources.json`. The batch reads the list for operator
/// visibility; items themselves carry their source name.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub data_path: PathBuf,
    pub sources_path: PathBuf,
    /// Only this many items from the head of the dataset are processed per
    /// run, to bound API cost.
    pub batch_size: usize,
    /// Pause between items, bounding the request rate.
    pub delay: Duration,
    pub excerpt_budget: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            sources_path: PathBuf::from("sources.json"),
            batch_size: 20,
            delay: Duration::from_secs(1),
            excerpt_budget: DEFAULT_EXCERPT_BUDGET,
        }
    }
}

/// Run one enrichment batch: fetch each item's page, digest it through the
/// model, merge the result, then dedup by link and persist. Per-item
/// failures keep the original item and never abort the batch.
pub async fn run_enrichment(
    opts: &EnrichOptions,
    fetcher: &dyn PageFetcher,
    model: &dyn DigestModel,
) -> Result<usize> {
    let dataset = read_dataset(&opts.data_path).await;
    let sources = read_sources(&opts.sources_path).await;
    info!("📚 Loaded {} items, {} sources", dataset.len(), sources.len());

    let batch_len = opts.batch_size.min(dataset.len());
    let mut rest = dataset;
    let batch: Vec<Item> = rest.drain(..batch_len).collect();

    let mut updated = Vec::with_capacity(batch.len());
    for (i, item) in batch.into_iter().enumerate() {
        info!("📰 Enriching {}/{} - {}", i + 1, batch_len, item.link);
        match enrich_item(&item, fetcher, model, opts.excerpt_budget).await {
            Ok(enriched) => {
                updated.push(enriched);
                tokio::time::sleep(opts.delay).await;
            }
            Err(e) => {
                warn!("Enrichment failed for {}: {}", item.link, e);
                updated.push(item);
            }
        }
    }

    updated.extend(rest);
    let result = dedup_by_link(updated);
    write_dataset(&opts.data_path, &result).await?;

    info!("✨ Updated {} with {} enriched items", opts.data_path.display(), batch_len);
    Ok(batch_len)
}

async fn enrich_item(
    item: &Item,
    fetcher: &dyn PageFetcher,
    model: &dyn DigestModel,
    excerpt_budget: usize,
) -> Result<Item> {
    let html = fetcher.fetch(&item.link).await?;
    let excerpt = extract_text(&html, excerpt_budget);
    let mut digest = model.digest(&item.title, &item.link, &excerpt).await?;
    verify_quote(&mut digest, &excerpt, &item.link);

    let mut enriched = item.clone();
    enriched.merge_digest(digest);
    Ok(enriched)
}

/// The prompt forbids fabricated quotes; enforce it. A quote that is not a
/// verbatim substring of the excerpt drops both language variants.
fn verify_quote(digest: &mut Digest, excerpt: &str, link: &str) {
    if let Some(quote) = digest.best_quote_en.as_deref() {
        if !quote.is_empty() && !excerpt.contains(quote) {
            warn!("Dropping fabricated quote for {}: {:?}", link, quote);
            digest.best_quote_en = None;
            digest.best_quote_zh = None;
        }
    }
}

async fn read_sources(path: &std::path::Path) -> Vec<SourceConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gems_core::Error;
    use gems_store::read_dataset;

    struct StubFetcher;

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            if url.contains("broken") {
                return Err(Error::Fetch("HTTP 500".to_string()));
            }
            Ok("<html><body><p>Real article text with a good sentence.</p></body></html>".to_string())
        }
    }

    struct StubModel {
        digest: Digest,
    }

    #[async_trait]
    impl DigestModel for StubModel {
        async fn digest(&self, _title: &str, _url: &str, _excerpt: &str) -> Result<Digest> {
            Ok(self.digest.clone())
        }
    }

    fn good_digest() -> Digest {
        Digest {
            summary_en: Some("summary".to_string()),
            best_quote_en: Some("a good sentence".to_string()),
            best_quote_zh: Some("好句子".to_string()),
            tags: vec!["b".to_string(), "c".to_string()],
            ..Digest::default()
        }
    }

    fn opts(dir: &std::path::Path) -> EnrichOptions {
        EnrichOptions {
            data_path: dir.join("data.json"),
            sources_path: dir.join("sources.json"),
            batch_size: 20,
            delay: Duration::ZERO,
            excerpt_budget: DEFAULT_EXCERPT_BUDGET,
        }
    }

    async fn write_items(path: &std::path::Path, items: &[Item]) {
        write_dataset(path, items).await.unwrap();
    }

    #[tokio::test]
    async fn test_batch_merges_digest_and_unions_tags() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path());
        let mut item = Item::new("http://ok/a", "A", "S");
        item.tags = vec!["a".to_string(), "b".to_string()];
        write_items(&opts.data_path, &[item]).await;

        let processed = run_enrichment(&opts, &StubFetcher, &StubModel { digest: good_digest() })
            .await
            .unwrap();
        assert_eq!(processed, 1);

        let out = read_dataset(&opts.data_path).await;
        assert_eq!(out[0].summary_en.as_deref(), Some("summary"));
        assert_eq!(out[0].best_quote_en.as_deref(), Some("a good sentence"));
        assert_eq!(out[0].tags, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_failed_item_kept_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path());
        write_items(
            &opts.data_path,
            &[Item::new("http://broken/a", "A", "S"), Item::new("http://ok/b", "B", "S")],
        )
        .await;

        run_enrichment(&opts, &StubFetcher, &StubModel { digest: good_digest() })
            .await
            .unwrap();

        let out = read_dataset(&opts.data_path).await;
        assert_eq!(out.len(), 2);
        assert!(out[0].summary_en.is_none(), "failed item must stay unmodified");
        assert_eq!(out[1].summary_en.as_deref(), Some("summary"));
    }

    #[tokio::test]
    async fn test_items_beyond_batch_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = opts(dir.path());
        opts.batch_size = 1;
        write_items(
            &opts.data_path,
            &[Item::new("http://ok/a", "A", "S"), Item::new("http://ok/b", "B", "S")],
        )
        .await;

        run_enrichment(&opts, &StubFetcher, &StubModel { digest: good_digest() })
            .await
            .unwrap();

        let out = read_dataset(&opts.data_path).await;
        assert_eq!(out.len(), 2);
        assert!(out[1].summary_en.is_none());
    }

    #[tokio::test]
    async fn test_output_deduped_by_link() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path());
        write_items(
            &opts.data_path,
            &[Item::new("http://ok/a", "First", "S"), Item::new("http://ok/a", "Second", "S")],
        )
        .await;

        run_enrichment(&opts, &StubFetcher, &StubModel { digest: good_digest() })
            .await
            .unwrap();

        let out = read_dataset(&opts.data_path).await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "First");
    }

    #[tokio::test]
    async fn test_fabricated_quote_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path());
        write_items(&opts.data_path, &[Item::new("http://ok/a", "A", "S")]).await;

        let digest = Digest {
            best_quote_en: Some("this sentence is not in the article".to_string()),
            best_quote_zh: Some("不在文中".to_string()),
            ..Digest::default()
        };
        run_enrichment(&opts, &StubFetcher, &StubModel { digest })
            .await
            .unwrap();

        let out = read_dataset(&opts.data_path).await;
        assert!(out[0].best_quote_en.is_none());
        assert!(out[0].best_quote_zh.is_none());
    }

    #[tokio::test]
    async fn test_empty_dataset_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path());
        write_items(&opts.data_path, &[]).await;

        let processed = run_enrichment(&opts, &StubFetcher, &StubModel { digest: good_digest() })
            .await
            .unwrap();
        assert_eq!(processed, 0);
        assert!(read_dataset(&opts.data_path).await.is_empty());
    }
}

use gems_core::{dates, Error, Item, Result};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Fetch and parse the curated dataset from a deployment base URL.
///
/// `data.json` is resolved relative to the base, so both root deployments
/// (`https://host/`) and subpath deployments (`https://host/curated-gems/`)
/// work. A cache-busting timestamp query is appended and HTTP caching is
/// disabled. No retry: the caller surfaces the error and aborts rendering.
pub async fn load_items(client: &Client, base_url: &str) -> Result<Vec<Item>> {
    let mut url = resolve_data_url(base_url)?;
    url.query_pairs_mut().append_pair("_", &dates::now_millis().to_string());

    debug!("Fetching dataset - url={}", url);
    let start = std::time::Instant::now();

    let resp = client.get(url.clone()).header(CACHE_CONTROL, "no-store").send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Fetch(format!("HTTP {} for {}", status.as_u16(), url)));
    }

    let body = resp.text().await?;
    let items = parse_dataset(&body)?;

    info!(
        "Dataset loaded - items={}, duration={:.2}s",
        items.len(),
        start.elapsed().as_secs_f32()
    );
    Ok(items)
}

/// Resolve `data.json` against a deployment base URL. The base names a
/// directory whether or not it carries a trailing slash, so one is added
/// before joining; otherwise `https://host/curated-gems` would resolve to
/// `https://host/data.json`.
pub fn resolve_data_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)
        .map_err(|e| Error::Fetch(format!("invalid base URL {}: {}", base_url, e)))?;
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join("data.json")
        .map_err(|e| Error::Fetch(format!("cannot resolve data.json against {}: {}", base_url, e)))
}

/// Parse a dataset body, rejecting HTML error pages and non-array JSON.
pub fn parse_dataset(body: &str) -> Result<Vec<Item>> {
    if looks_like_html(body) {
        return Err(Error::Format(
            "response body is HTML, not JSON (misconfigured deployment?)".to_string(),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("dataset is not valid JSON: {}", e)))?;
    if !value.is_array() {
        return Err(Error::Parse("dataset is not a JSON array".to_string()));
    }

    serde_json::from_value(value).map_err(|e| Error::Parse(format!("dataset item malformed: {}", e)))
}

/// Sniff an HTML error page by its doctype or opening tag.
fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start().to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

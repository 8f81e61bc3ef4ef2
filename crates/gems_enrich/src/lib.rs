pub mod extract;
pub mod fetch;
pub mod job;
pub mod openrouter;
pub mod prompt;

pub use extract::extract_text;
pub use fetch::{HttpFetcher, PageFetcher};
pub use job::{run_enrichment, EnrichOptions};
pub use openrouter::{DigestModel, OpenRouterClient};

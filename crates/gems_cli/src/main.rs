use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use gems_core::{Lang, Result};
use gems_engine::{
    recommend, source_facets, tag_facets, visible, FacetMode, FilterState, SortSpec,
};
use gems_enrich::{run_enrichment, EnrichOptions, HttpFetcher, OpenRouterClient};
use gems_render::{render_cards, render_chips, render_empty, EmptyReason};
use gems_store::{load_items, PickState};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Curated article feed: render, recommend, enrich", long_about = None)]
struct Cli {
    /// Display language, the CLI counterpart of the page's `lang` query
    /// parameter
    #[arg(long, default_value = "zh")]
    lang: Lang,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the dataset and write the filtered card markup
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Write the markup to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Recommend one random item from the visible set and print its link
    Pick {
        #[command(flatten)]
        view: ViewArgs,
        /// Where the last recommendation's identity is persisted
        #[arg(long, default_value = "gems_state.json")]
        state_file: PathBuf,
    },
    /// Enrich the head of the local dataset through the chat-completion API
    Enrich {
        #[arg(long, default_value = "data.json")]
        data: PathBuf,
        #[arg(long, default_value = "sources.json")]
        sources: PathBuf,
        #[arg(long, default_value_t = 20)]
        batch_size: usize,
        /// Pause between items in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Deployment base URL that data.json is resolved against
    #[arg(long)]
    data: String,
    /// Search text (case-insensitive substring)
    #[arg(long, default_value = "")]
    query: String,
    /// Source chips to click, in order
    #[arg(long = "source")]
    sources: Vec<String>,
    /// Tag chips to click, in order
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Sort spec: date-desc, date-asc, title-asc or title-desc
    #[arg(long, default_value = "date-desc")]
    sort: SortSpec,
    /// Single-select facet chips (last clicked wins), as in the early page
    /// variants
    #[arg(long)]
    single_select: bool,
    /// Show per-facet item counts on the chips
    #[arg(long)]
    counts: bool,
}

impl ViewArgs {
    fn state(&self, lang: Lang) -> FilterState {
        let mut state = FilterState::new(lang);
        state.query = self.query.clone();
        state.sort = self.sort;
        state.facet_mode = if self.single_select { FacetMode::Single } else { FacetMode::Multi };
        for source in &self.sources {
            state.click_source(source);
        }
        for tag in &self.tags {
            state.click_tag(tag);
        }
        state
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { view, out } => render_command(cli.lang, view, out).await,
        Commands::Pick { view, state_file } => pick_command(cli.lang, view, state_file).await,
        Commands::Enrich { data, sources, batch_size, delay_ms } => {
            let opts = EnrichOptions {
                data_path: data,
                sources_path: sources,
                batch_size,
                delay: Duration::from_millis(delay_ms),
                ..EnrichOptions::default()
            };
            let fetcher = HttpFetcher::new()?;
            let model = OpenRouterClient::from_env()?;
            let enriched = run_enrichment(&opts, &fetcher, &model).await?;
            info!("🎉 Enriched {} items", enriched);
            Ok(())
        }
    }
}

async fn load_or_abort(lang: Lang, base_url: &str) -> Result<Vec<gems_core::Item>> {
    let client = reqwest::Client::new();
    match load_items(&client, base_url).await {
        Ok(items) => Ok(items),
        Err(e) => {
            // No retry: surface the localized message and abort rendering.
            error!("Dataset load failed: {}", e);
            print!("{}", render_empty(lang, EmptyReason::LoadFailed));
            Err(e)
        }
    }
}

async fn render_command(lang: Lang, view: ViewArgs, out: Option<PathBuf>) -> Result<()> {
    let items = load_or_abort(lang, &view.data).await?;
    let state = view.state(lang);
    let visible_items = visible(&items, &state);

    let mut markup = String::new();
    markup.push_str(&render_chips(&source_facets(&items), &state.sources, "source", view.counts));
    markup.push_str(&render_chips(&tag_facets(&items, lang), &state.tags, "tag", view.counts));
    if visible_items.is_empty() {
        let reason = if items.is_empty() { EmptyReason::NoContent } else { EmptyReason::NoMatches };
        markup.push_str(&render_empty(lang, reason));
    } else {
        markup.push_str(&render_cards(&visible_items, lang));
    }

    match out {
        Some(path) => {
            tokio::fs::write(&path, &markup).await?;
            info!("📄 Wrote {} cards to {}", visible_items.len(), path.display());
        }
        None => print!("{}", markup),
    }
    Ok(())
}

async fn pick_command(lang: Lang, view: ViewArgs, state_file: PathBuf) -> Result<()> {
    let items = load_or_abort(lang, &view.data).await?;
    let state = view.state(lang);
    let visible_items = visible(&items, &state);

    let mut pick_state = PickState::load(&state_file).await;
    match recommend(&visible_items, pick_state.last_pick_id.as_deref()) {
        Some(pick) => {
            println!("{}", pick.link);
            pick_state.last_pick_id = Some(pick.pick_id().to_string());
            pick_state.save(&state_file).await?;
        }
        None => info!("Nothing to recommend: visible set is empty"),
    }
    Ok(())
}

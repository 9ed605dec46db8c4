use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mimalloc::MiMalloc;
use page::{Page, PageConfig, PageEvent, RecordingHost};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Load a documentation page, replay reader interactions against it and print the result.
#[derive(Parser, Debug)]
#[command(name = "docpage", version, about, long_about = None)]
struct Cli {
    /// HTML page to load.
    page: PathBuf,

    /// TOML file with selectors, timings and labels.
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL the page is served from.
    #[arg(long, default_value = "http://localhost/index.html")]
    location: String,

    /// Type a query into the search box and wait for the highlight pass. Repeatable.
    #[arg(long = "search", value_name = "QUERY")]
    searches: Vec<String>,

    /// Scroll to this offset and let the scroll spy settle.
    #[arg(long, value_name = "Y")]
    scroll: Option<f32>,

    /// Click the first element matching this selector. Repeatable.
    #[arg(long = "click", value_name = "SELECTOR")]
    clicks: Vec<String>,

    /// Print the heading outline instead of the HTML.
    #[arg(long)]
    outline: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => PageConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PageConfig::default(),
    };
    if cli.dump_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let source = std::fs::read_to_string(&cli.page)
        .with_context(|| format!("reading {}", cli.page.display()))?;
    let host = RecordingHost::new(cli.location.as_str());
    let mut page = Page::load(&source, host, config).context("starting page")?;
    tracing::info!(page = %cli.page.display(), toc_entries = page.toc_entries(), "page loaded");

    let search_window = page.config().search.debounce_ms;
    for query in &cli.searches {
        let Some(input) = page.search_input() else {
            bail!("page has no search input");
        };
        page.dispatch(PageEvent::Input {
            target: input,
            value: query.clone(),
        });
        page.advance_time(search_window);
        tracing::info!(query = %query, wrapped = page.highlighted_leaves(), "search pass done");
    }

    if let Some(y) = cli.scroll {
        let spy_window = page.config().scroll.spy_debounce_ms;
        page.dispatch(PageEvent::Scroll { y });
        page.advance_time(spy_window);
    }

    for selector in &cli.clicks {
        let doc = page.document();
        let target = css::query_selector(doc, doc.root(), selector)
            .with_context(|| format!("parsing --click selector {selector:?}"))?;
        let Some(target) = target else {
            tracing::warn!(selector = %selector, "no element to click");
            continue;
        };
        let outcome = page.dispatch(PageEvent::Click { target });
        tracing::info!(selector = %selector, prevented = outcome.default_prevented, "clicked");
    }

    // let copy feedback and other pending timers finish
    let feedback_window = page.config().copy.feedback_ms;
    page.advance_time(feedback_window);

    for action in page.host().actions() {
        tracing::debug!(?action, "host action");
        eprintln!("action: {action}");
    }

    let doc = page.document();
    if cli.outline {
        for line in html::dom_utils::outline(doc, doc.root(), usize::MAX) {
            println!("{line}");
        }
    } else {
        println!("{}", html::to_html(doc, doc.root()));
    }
    Ok(())
}

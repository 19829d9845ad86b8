use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context as _;
use scraper::{Html, Selector};
use url::Url;

use crate::cli::LinksArgs;
use crate::dom;
use crate::fetch::{FetchMode, Fetcher};

static MENU_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.menu-item").expect("valid selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static SUB_MENU_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.sub-menu a[href]").expect("valid selector"));

pub fn run(args: LinksArgs) -> anyhow::Result<()> {
    let url = Url::parse(&args.url).context("parse --url")?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("--url must be http/https: {url}");
    }

    let fetcher = Fetcher::new(FetchMode::from_no_render(args.no_render))
        .context("open page fetcher")?;

    tracing::info!(url = %args.url, "loading index page");
    let html = fetcher
        .fetch(&args.url, args.settle_ms)
        .with_context(|| format!("fetch index page: {}", args.url))?;

    std::fs::write(&args.dump, &html)
        .with_context(|| format!("write index page dump: {}", args.dump))?;

    let links = collect_menu_links(&html, &args.menu_label, &args.link_prefix, &args.path_fragment);
    tracing::info!(count = links.len(), "collected content links");

    write_link_list(Path::new(&args.out), &links)?;
    Ok(())
}

/// Collects content links from under the named navigation menu entry.
/// Returns the deduplicated, lexicographically sorted list; a missing menu
/// entry yields an empty list rather than an error.
pub fn collect_menu_links(
    html: &str,
    menu_label: &str,
    link_prefix: &str,
    path_fragment: &str,
) -> Vec<String> {
    let document = Html::parse_document(html);

    let menu_root = document.select(&MENU_ITEM).find(|item| {
        item.select(&ANCHOR)
            .next()
            .is_some_and(|anchor| dom::collapsed_text(anchor).contains(menu_label))
    });

    let Some(menu_root) = menu_root else {
        tracing::warn!(menu_label, "menu entry not found on index page");
        return Vec::new();
    };

    let mut links: Vec<String> = menu_root
        .select(&SUB_MENU_ANCHOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with(link_prefix) && href.contains(path_fragment))
        .map(str::to_owned)
        .collect();

    links.sort();
    links.dedup();
    links
}

fn write_link_list(path: &Path, links: &[String]) -> anyhow::Result<()> {
    let mut out = String::new();
    for link in links {
        out.push_str(link);
        out.push('\n');
    }

    std::fs::write(path, out).with_context(|| format!("write link list: {}", path.display()))?;
    Ok(())
}

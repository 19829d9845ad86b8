use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::{CleanArgs, LinksArgs, RunArgs, ScrapeArgs};
use crate::interrupt;

/// Composes the three stages over one workspace directory:
/// links -> scrape (one file per URL) -> clean (one file per extracted file).
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let workspace_dir = PathBuf::from(&args.out);
    if workspace_dir.exists() {
        anyhow::bail!(
            "workspace output directory already exists: {}",
            workspace_dir.display()
        );
    }
    std::fs::create_dir_all(&workspace_dir)
        .with_context(|| format!("create workspace dir: {}", workspace_dir.display()))?;

    let urls_path = workspace_dir.join("cheatsheet_urls.txt");
    let dump_path = workspace_dir.join("index_page_dump.html");
    let pages_dir = workspace_dir.join("pages");
    let clean_dir = workspace_dir.join("pages_clean");

    tracing::info!(url = %args.url, out = %workspace_dir.display(), "run: links");
    crate::links::run(LinksArgs {
        url: args.url.clone(),
        menu_label: args.menu_label.clone(),
        link_prefix: args.link_prefix.clone(),
        path_fragment: args.path_fragment.clone(),
        out: urls_path.to_string_lossy().to_string(),
        dump: dump_path.to_string_lossy().to_string(),
        settle_ms: args.settle_ms,
        no_render: args.no_render,
    })
    .context("links")?;

    tracing::info!("run: scrape");
    crate::extract::run(ScrapeArgs {
        urls: urls_path.to_string_lossy().to_string(),
        out: pages_dir.to_string_lossy().to_string(),
        marker: args.marker.clone(),
        no_render: args.no_render,
    })
    .context("scrape")?;

    if interrupt::interrupted() {
        tracing::info!("interrupted; leaving workspace partially processed");
        return Ok(());
    }

    tracing::info!("run: clean");
    crate::clean::run(CleanArgs {
        input: pages_dir.to_string_lossy().to_string(),
        out: clean_dir.to_string_lossy().to_string(),
        config: args.config.clone(),
    })
    .context("clean")?;

    Ok(())
}

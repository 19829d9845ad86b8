use std::fs::OpenOptions;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context as _;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::cli::ScrapeArgs;
use crate::dom;
use crate::fetch::{FetchMode, Fetcher};
use crate::formats::{PageOutcome, PageRecord, SkipReason};
use crate::interrupt;
use crate::store;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("valid selector"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// A recognized content node, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    List { kind: ListKind, items: Vec<String> },
    CodeBlock(String),
    Container(String),
}

#[derive(Debug)]
pub struct ExtractedPage {
    pub title: String,
    pub markdown: String,
}

pub fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let urls = read_url_list(Path::new(&args.urls))?;
    tracing::info!(count = urls.len(), "scraping content pages");

    let out_dir = PathBuf::from(&args.out);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir: {}", out_dir.display()))?;

    let fetcher = Fetcher::new(FetchMode::from_no_render(args.no_render))
        .context("open page fetcher")?;

    let records_path = out_dir.join("pages.jsonl");
    let records_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&records_path)
        .with_context(|| format!("create page record log: {}", records_path.display()))?;
    let mut records = BufWriter::new(records_file);

    for url in &urls {
        if interrupt::interrupted() {
            tracing::info!("interrupted; stopping before remaining pages");
            break;
        }

        let record = scrape_one(&fetcher, url, &args.marker, &out_dir);
        serde_json::to_writer(&mut records, &record).context("write page record")?;
        records
            .write_all(b"\n")
            .context("write page record newline")?;
    }

    records.flush().context("flush page records")?;
    Ok(())
}

/// Every failure here is permanent-for-that-page: logged, recorded, and the
/// batch moves on.
fn scrape_one(fetcher: &Fetcher, url: &str, marker: &str, out_dir: &Path) -> PageRecord {
    let retrieved_at = chrono::Utc::now().to_rfc3339();

    let outcome = match fetch_and_extract(fetcher, url, marker, out_dir) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(url, ?err, "page fetch failed; skipping");
            PageOutcome::Skipped {
                reason: SkipReason::FetchFailed,
            }
        }
    };

    PageRecord {
        url: url.to_owned(),
        outcome,
        retrieved_at,
    }
}

fn fetch_and_extract(
    fetcher: &Fetcher,
    url: &str,
    marker: &str,
    out_dir: &Path,
) -> anyhow::Result<PageOutcome> {
    tracing::info!(url, "scraping");
    let html = fetcher.fetch(url, 0)?;

    match extract_page(&html, marker) {
        Ok(page) => {
            let filename = store::markdown_filename(&page.title);
            let path = store::write_markdown(out_dir, &filename, &page.markdown)?;
            tracing::info!(url, path = %path.display(), "saved");
            Ok(PageOutcome::Saved {
                title: page.title,
                path: path.to_string_lossy().to_string(),
            })
        }
        Err(reason) => {
            tracing::warn!(url, ?reason, "page skipped");
            Ok(PageOutcome::Skipped { reason })
        }
    }
}

/// Extracts one rendered page into Markdown, or reports why it was skipped.
pub fn extract_page(html: &str, marker: &str) -> Result<ExtractedPage, SkipReason> {
    let document = Html::parse_document(html);

    let title = document
        .select(&H1)
        .next()
        .map(dom::collapsed_text)
        .filter(|title| !title.is_empty())
        .ok_or(SkipReason::NoTitle)?;

    let marker_el = find_marker(&document, marker).ok_or(SkipReason::NoMarker)?;

    let blocks = collect_blocks(marker_el);
    if blocks.is_empty() {
        return Err(SkipReason::NoContent);
    }

    let markdown = serialize(&title, &blocks);
    Ok(ExtractedPage { title, markdown })
}

/// The content-start marker: the first paragraph whose collapsed text
/// contains the marker substring, case-insensitively. Nested inline tags
/// (e.g. `<strong>`) are handled by matching on collapsed text.
fn find_marker<'a>(document: &'a Html, marker: &str) -> Option<ElementRef<'a>> {
    let marker_lower = marker.to_lowercase();
    document
        .select(&P)
        .find(|p| dom::collapsed_text(*p).to_lowercase().contains(&marker_lower))
}

/// Walks the marker's following siblings in document order, stopping at a
/// footer boundary. Non-element nodes (text, comments) are passed over.
fn collect_blocks(marker: ElementRef<'_>) -> Vec<Block> {
    let mut blocks = Vec::new();

    for sibling in marker.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };

        if is_footer_boundary(element) {
            break;
        }

        if let Some(block) = classify(element) {
            blocks.push(block);
        }
    }

    blocks
}

fn is_footer_boundary(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "footer" | "nav")
        || matches!(element.value().attr("id"), Some("footer" | "site-footer"))
}

/// Classifies one element into a recognized block. Unrecognized tags and
/// elements with no visible text yield `None`.
pub fn classify(element: ElementRef<'_>) -> Option<Block> {
    let text = dom::collapsed_text(element);
    if text.is_empty() {
        return None;
    }

    match element.value().name() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = element.value().name().as_bytes()[1] - b'0';
            Some(Block::Heading { level, text })
        }
        "p" => Some(Block::Paragraph(text)),
        "ul" => Some(Block::List {
            kind: ListKind::Unordered,
            items: list_items(element),
        }),
        "ol" => Some(Block::List {
            kind: ListKind::Ordered,
            items: list_items(element),
        }),
        "pre" | "code" => Some(Block::CodeBlock(dom::raw_text(element))),
        "div" | "section" | "span" => Some(Block::Container(text)),
        _ => None,
    }
}

/// One entry per descendant list item; nesting is flattened, not preserved.
fn list_items(element: ElementRef<'_>) -> Vec<String> {
    let mut items = Vec::new();
    for node in element.descendants() {
        let Some(item) = ElementRef::wrap(node) else {
            continue;
        };
        if item.value().name() != "li" {
            continue;
        }
        let text = dom::collapsed_text(item);
        if !text.is_empty() {
            items.push(text);
        }
    }
    items
}

/// Renders the title heading and blocks to the output grammar. Every block
/// ends with a blank separator line.
pub fn serialize(title: &str, blocks: &[Block]) -> String {
    let mut out = format!("# {title}\n\n");

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                out.push_str(&"#".repeat(usize::from(*level)));
                out.push(' ');
                out.push_str(text);
                out.push_str("\n\n");
            }
            Block::Paragraph(text) | Block::Container(text) => {
                out.push_str(text);
                out.push_str("\n\n");
            }
            Block::List { items, .. } => {
                for item in items {
                    out.push_str("- ");
                    out.push_str(item);
                    out.push('\n');
                }
                out.push('\n');
            }
            Block::CodeBlock(code) => {
                out.push_str("```\n");
                out.push_str(code);
                out.push_str("\n```\n\n");
            }
        }
    }

    out
}

fn read_url_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read url list: {}", path.display()))?;

    let mut urls = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if Url::parse(line).is_err() {
            tracing::warn!(line, "skipping malformed url in list");
            continue;
        }
        urls.push(line.to_owned());
    }

    Ok(urls)
}

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_INDEX_URL: &str = "https://tutorialsdojo.com/aws-cheat-sheets/";
pub const DEFAULT_MENU_LABEL: &str = "AWS Cheat Sheets";
pub const DEFAULT_LINK_PREFIX: &str = "https://tutorialsdojo.com/";
pub const DEFAULT_PATH_FRAGMENT: &str = "cheat-sheet";
pub const DEFAULT_MARKER: &str = "last updated on";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Run(RunArgs),
    Links(LinksArgs),
    Scrape(ScrapeArgs),
    Clean(CleanArgs),
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Index page URL listing the content pages (must be http/https).
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    pub url: String,

    /// Navigation menu label whose subtree holds the content links.
    #[arg(long, default_value = DEFAULT_MENU_LABEL)]
    pub menu_label: String,

    /// Collected links must start with this prefix.
    #[arg(long, default_value = DEFAULT_LINK_PREFIX)]
    pub link_prefix: String,

    /// Collected links must contain this path fragment.
    #[arg(long, default_value = DEFAULT_PATH_FRAGMENT)]
    pub path_fragment: String,

    /// Output file for the collected link list (one URL per line).
    #[arg(long, default_value = "cheatsheet_urls.txt")]
    pub out: String,

    /// Debug dump of the rendered index page markup.
    #[arg(long, default_value = "index_page_dump.html")]
    pub dump: String,

    /// Settle delay after navigation, in milliseconds (rendered mode only).
    #[arg(long, default_value_t = 5000)]
    pub settle_ms: u64,

    /// Fetch with a plain HTTP GET instead of a headless browser.
    #[arg(long)]
    pub no_render: bool,
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Input file with one content URL per line (created by `links`).
    #[arg(long, default_value = "cheatsheet_urls.txt")]
    pub urls: String,

    /// Output directory for extracted Markdown files.
    #[arg(long, default_value = "cheatsheets")]
    pub out: String,

    /// Case-insensitive paragraph substring marking where content starts.
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Fetch with a plain HTTP GET instead of a headless browser.
    #[arg(long)]
    pub no_render: bool,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Input directory of Markdown files (created by `scrape`).
    #[arg(long, default_value = "cheatsheets")]
    pub input: String,

    /// Output directory for cleaned Markdown files.
    #[arg(long, default_value = "cheatsheets_clean")]
    pub out: String,

    /// Optional YAML file with filter triggers and thresholds.
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Index page URL listing the content pages (must be http/https).
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    pub url: String,

    /// Navigation menu label whose subtree holds the content links.
    #[arg(long, default_value = DEFAULT_MENU_LABEL)]
    pub menu_label: String,

    /// Collected links must start with this prefix.
    #[arg(long, default_value = DEFAULT_LINK_PREFIX)]
    pub link_prefix: String,

    /// Collected links must contain this path fragment.
    #[arg(long, default_value = DEFAULT_PATH_FRAGMENT)]
    pub path_fragment: String,

    /// Case-insensitive paragraph substring marking where content starts.
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Output directory for the workspace (urls/dump/pages/pages_clean).
    #[arg(long)]
    pub out: String,

    /// Settle delay after navigation, in milliseconds (rendered mode only).
    #[arg(long, default_value_t = 5000)]
    pub settle_ms: u64,

    /// Optional YAML file with filter triggers and thresholds.
    #[arg(long)]
    pub config: Option<String>,

    /// Fetch with a plain HTTP GET instead of a headless browser.
    #[arg(long)]
    pub no_render: bool,
}

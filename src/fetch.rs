use std::time::Duration;

use anyhow::Context as _;
use headless_chrome::{Browser, LaunchOptions};
use reqwest::header::{ACCEPT, USER_AGENT};

/// How pages are retrieved: through a headless browser (for script-populated
/// markup) or with a plain HTTP GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Rendered,
    Plain,
}

impl FetchMode {
    pub fn from_no_render(no_render: bool) -> Self {
        if no_render {
            FetchMode::Plain
        } else {
            FetchMode::Rendered
        }
    }
}

/// Page source for one pipeline phase. The browser session lives as long as
/// this value; each fetch opens and closes its own tab.
pub struct Fetcher {
    browser: Option<Browser>,
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(mode: FetchMode) -> anyhow::Result<Self> {
        let browser = match mode {
            FetchMode::Rendered => {
                let options = LaunchOptions::default_builder()
                    .headless(true)
                    .build()
                    .map_err(|err| anyhow::anyhow!("build browser launch options: {err}"))?;
                Some(Browser::new(options).context("launch headless browser")?)
            }
            FetchMode::Plain => None,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build http client")?;

        Ok(Self { browser, client })
    }

    /// Retrieves the page markup, post-render when a browser is attached.
    /// `settle_ms` applies to rendered fetches only.
    pub fn fetch(&self, url: &str, settle_ms: u64) -> anyhow::Result<String> {
        match &self.browser {
            Some(browser) => {
                let tab = browser.new_tab().context("open browser tab")?;
                tab.navigate_to(url)
                    .with_context(|| format!("navigate to {url}"))?;
                tab.wait_until_navigated()
                    .with_context(|| format!("wait for navigation: {url}"))?;
                if settle_ms > 0 {
                    std::thread::sleep(Duration::from_millis(settle_ms));
                }
                let html = tab
                    .get_content()
                    .with_context(|| format!("read rendered markup: {url}"))?;
                let _ = tab.close(true);
                Ok(html)
            }
            None => {
                let response = self
                    .client
                    .get(url)
                    .header(USER_AGENT, "sheetdown/0.1")
                    .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
                    .send()
                    .with_context(|| format!("GET {url}"))?;

                if !response.status().is_success() {
                    anyhow::bail!("GET {url}: status {}", response.status());
                }

                response.text().with_context(|| format!("read body: {url}"))
            }
        }
    }
}

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::cli::CleanArgs;
use crate::interrupt;

/// Boilerplate-removal settings. Passed by value into the filter so the
/// filter itself stays pure and independently testable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Case-insensitive phrases that open a skip span. The triggering line
    /// is dropped along with everything up to the next heading or blank line.
    pub triggers: Vec<String>,

    /// Bullet lines longer than this many characters are dropped outright;
    /// collapsed navigation menus tend to render as one enormous list item.
    pub max_bullet_chars: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            triggers: [
                "validate your knowledge",
                "subscribe to our newsletter",
                "written by:",
                "recent posts",
                "references:",
                "follow us on",
                "view our aws",
                "check out our free courses",
                "did you find our content helpful",
            ]
            .iter()
            .map(|trigger| (*trigger).to_owned())
            .collect(),
            max_bullet_chars: 400,
        }
    }
}

impl FilterConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read filter config: {}", path.display()))?;
        serde_yaml::from_str(&yaml).context("parse filter config")
    }
}

/// Filter position within the line stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Normal,
    Skipping,
}

pub fn run(args: CleanArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => FilterConfig::load(Path::new(path))?,
        None => FilterConfig::default(),
    };

    clean_dir(Path::new(&args.input), Path::new(&args.out), &config)
}

pub fn clean_dir(input_dir: &Path, out_dir: &Path, config: &FilterConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create cleaned output dir: {}", out_dir.display()))?;

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(input_dir)
        .with_context(|| format!("read input dir: {}", input_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("md") {
            paths.push(path);
        }
    }
    paths.sort();

    tracing::info!(count = paths.len(), "cleaning markdown files");

    for path in paths {
        if interrupt::interrupted() {
            tracing::info!("interrupted; stopping before remaining files");
            break;
        }
        clean_file(&path, out_dir, config)?;
    }

    Ok(())
}

fn clean_file(path: &Path, out_dir: &Path, config: &FilterConfig) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read markdown: {}", path.display()))?;

    let kept = clean_lines(contents.lines(), config);
    if kept.is_empty() {
        tracing::warn!(path = %path.display(), "empty after cleaning; no output written");
        return Ok(());
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("markdown path has no file name: {}", path.display()))?;
    let out_path = out_dir.join(file_name);

    let mut cleaned = kept.join("\n");
    cleaned.push('\n');
    std::fs::write(&out_path, cleaned)
        .with_context(|| format!("write cleaned markdown: {}", out_path.display()))?;

    tracing::info!(path = %out_path.display(), "cleaned");
    Ok(())
}

/// Single forward pass over one document's lines. Lines are taken and
/// returned without trailing newlines.
///
/// The span machine: a trigger phrase drops its line and moves to Skipping;
/// Skipping drops lines until a heading or blank line, which returns to
/// Normal and is then evaluated like any other line (it may re-trigger).
pub fn clean_lines<'a, I>(lines: I, config: &FilterConfig) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let triggers: Vec<String> = config
        .triggers
        .iter()
        .map(|trigger| trigger.to_lowercase())
        .collect();

    let mut kept = Vec::new();
    let mut state = FilterState::Normal;

    for line in lines {
        if state == FilterState::Skipping {
            if is_heading(line) || line.trim().is_empty() {
                state = FilterState::Normal;
            } else {
                continue;
            }
        }

        let lower = line.to_lowercase();
        if triggers.iter().any(|trigger| lower.contains(trigger)) {
            state = FilterState::Skipping;
            continue;
        }

        if line.starts_with("- ") && line.chars().count() > config.max_bullet_chars {
            continue;
        }

        kept.push(line.to_owned());
    }

    kept
}

/// A Markdown heading line: one to six '#' followed by whitespace.
fn is_heading(line: &str) -> bool {
    let hashes = line.bytes().take_while(|byte| *byte == b'#').count();
    (1..=6).contains(&hashes)
        && line[hashes..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(lines: &[&str]) -> Vec<String> {
        clean_lines(lines.iter().copied(), &FilterConfig::default())
    }

    #[test]
    fn example_filter_sequence() {
        let kept = clean(&["## Bar", "hello", "Written by: J. Doe", "some junk", "## Next"]);
        assert_eq!(kept, vec!["## Bar", "hello", "## Next"]);
    }

    #[test]
    fn trigger_matches_case_insensitively() {
        let kept = clean(&["keep", "SUBSCRIBE TO OUR NEWSLETTER today", "dropped"]);
        assert_eq!(kept, vec!["keep"]);
    }

    #[test]
    fn blank_line_ends_the_span_and_is_retained() {
        let kept = clean(&["Recent Posts", "post one", "post two", "", "after"]);
        assert_eq!(kept, vec!["", "after"]);
    }

    #[test]
    fn boundary_heading_can_retrigger_the_span() {
        let kept = clean(&["Written by: someone", "junk", "## References: more", "junk too", "", "after"]);
        assert_eq!(kept, vec!["", "after"]);
    }

    #[test]
    fn bullet_length_boundary_at_threshold() {
        let exactly = format!("- {}", "x".repeat(398));
        let over = format!("- {}", "x".repeat(399));
        assert_eq!(exactly.chars().count(), 400);
        assert_eq!(over.chars().count(), 401);

        let kept = clean_lines(
            [exactly.as_str(), over.as_str()],
            &FilterConfig::default(),
        );
        assert_eq!(kept, vec![exactly]);
    }

    #[test]
    fn long_non_bullet_lines_are_retained() {
        let long = "x".repeat(500);
        let kept = clean(&[long.as_str()]);
        assert_eq!(kept, vec![long.clone()]);
    }

    #[test]
    fn heading_detection_requires_whitespace_after_hashes() {
        assert!(is_heading("# Title"));
        assert!(is_heading("###### deep"));
        assert!(!is_heading("#hashtag"));
        assert!(!is_heading("####### seven"));
        assert!(!is_heading("plain"));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(clean(&[]).is_empty());
    }

    #[test]
    fn custom_config_overrides_defaults() {
        let config = FilterConfig {
            triggers: vec!["Sponsored".to_owned()],
            max_bullet_chars: 10,
        };
        let kept = clean_lines(
            ["keep", "sponsored content", "", "- tiny", "- far too long bullet"],
            &config,
        );
        assert_eq!(kept, vec!["keep", "", "- tiny"]);
    }

    #[test]
    fn config_yaml_round_trip_with_defaults() -> anyhow::Result<()> {
        let config: FilterConfig = serde_yaml::from_str("max_bullet_chars: 120\n")?;
        assert_eq!(config.max_bullet_chars, 120);
        assert!(!config.triggers.is_empty(), "defaults fill missing fields");
        Ok(())
    }
}

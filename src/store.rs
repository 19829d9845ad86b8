use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Turns a page title into a filesystem-safe Markdown filename. Spaces and
/// path separators become underscores. Colliding titles overwrite the
/// earlier file.
pub fn markdown_filename(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|ch| match ch {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{sanitized}.md")
}

/// Whole-file write after full in-memory assembly; never a partial document.
pub fn write_markdown(dir: &Path, filename: &str, contents: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir: {}", dir.display()))?;

    let path = dir.join(filename);
    std::fs::write(&path, contents)
        .with_context(|| format!("write markdown: {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_spaces_and_separators() {
        assert_eq!(
            markdown_filename("Amazon S3 / Glacier"),
            "Amazon_S3___Glacier.md"
        );
        assert_eq!(markdown_filename(r"a\b"), "a_b.md");
    }

    #[test]
    fn filename_keeps_other_characters() {
        assert_eq!(markdown_filename("EC2: Basics"), "EC2:_Basics.md");
    }

    #[test]
    fn write_overwrites_existing_file() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        write_markdown(temp.path(), "a.md", "first\n")?;
        let path = write_markdown(temp.path(), "a.md", "second\n")?;
        assert_eq!(std::fs::read_to_string(path)?, "second\n");
        Ok(())
    }
}

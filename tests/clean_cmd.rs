use std::fs;

use predicates::prelude::*;

#[test]
fn clean_rewrites_files_and_skips_empty_results() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let input_dir = temp.path().join("pages");
    let out_dir = temp.path().join("pages_clean");
    fs::create_dir_all(&input_dir)?;

    fs::write(
        input_dir.join("Keep.md"),
        "# Keep\n\nbody line\n\nWritten by: J. Doe\nsome junk\n## Next\n\nafter\n",
    )?;
    fs::write(
        input_dir.join("Empty.md"),
        "Subscribe to our Newsletter\nRecent Posts dump\n",
    )?;
    fs::write(input_dir.join("notes.txt"), "not markdown, not touched\n")?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sheetdown");
    cmd.args([
        "clean",
        "--input",
        input_dir.to_str().unwrap(),
        "--out",
        out_dir.to_str().unwrap(),
    ])
    .assert()
    .success();

    let kept = fs::read_to_string(out_dir.join("Keep.md"))?;
    assert_eq!(kept, "# Keep\n\nbody line\n\n## Next\n\nafter\n");

    assert!(
        !out_dir.join("Empty.md").exists(),
        "empty post-filter documents must not be written"
    );
    assert!(!out_dir.join("notes.txt").exists());

    Ok(())
}

#[test]
fn clean_honors_a_custom_config_file() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let input_dir = temp.path().join("pages");
    let out_dir = temp.path().join("pages_clean");
    fs::create_dir_all(&input_dir)?;

    let config_path = temp.path().join("filter.yaml");
    fs::write(
        &config_path,
        "triggers:\n  - \"sponsored\"\nmax_bullet_chars: 10\n",
    )?;

    fs::write(
        input_dir.join("Doc.md"),
        "# Doc\n\nSponsored content\nhidden\n\n- ok\n- far too long bullet line\n",
    )?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sheetdown");
    cmd.args([
        "clean",
        "--input",
        input_dir.to_str().unwrap(),
        "--out",
        out_dir.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
    ])
    .assert()
    .success();

    let cleaned = fs::read_to_string(out_dir.join("Doc.md"))?;
    assert_eq!(cleaned, "# Doc\n\n\n- ok\n");

    Ok(())
}

#[test]
fn clean_fails_on_missing_input_dir() {
    let temp = tempfile::TempDir::new().expect("create temp dir");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sheetdown");
    cmd.args([
        "clean",
        "--input",
        temp.path().join("nope").to_str().unwrap(),
        "--out",
        temp.path().join("out").to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("read input dir"));
}

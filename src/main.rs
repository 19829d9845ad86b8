use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    sheetdown::logging::init().context("init logging")?;
    sheetdown::interrupt::install().context("install interrupt handler")?;

    let cli = sheetdown::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        sheetdown::cli::Command::Run(args) => {
            sheetdown::pipeline::run(args).context("run")?;
        }
        sheetdown::cli::Command::Links(args) => {
            sheetdown::links::run(args).context("links")?;
        }
        sheetdown::cli::Command::Scrape(args) => {
            sheetdown::extract::run(args).context("scrape")?;
        }
        sheetdown::cli::Command::Clean(args) => {
            sheetdown::clean::run(args).context("clean")?;
        }
    }

    Ok(())
}

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use causelist::formats::DownloadOutcome;

/// Exit status when the portal has no cause list for the selection.
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    causelist::logging::init("info").context("init logging")?;

    let cli = causelist::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        causelist::cli::Command::States(args) => {
            causelist::list::states(args).context("states")?;
        }
        causelist::cli::Command::Districts(args) => {
            causelist::list::districts(args).context("districts")?;
        }
        causelist::cli::Command::Complexes(args) => {
            causelist::list::complexes(args).context("complexes")?;
        }
        causelist::cli::Command::Courts(args) => {
            causelist::list::courts(args).context("courts")?;
        }
        causelist::cli::Command::Download(args) => {
            match causelist::download::run(args).context("download")? {
                DownloadOutcome::Saved(path) => println!("{}", path.display()),
                DownloadOutcome::NotFound(reason) => {
                    eprintln!("no cause list found for this court/date: {reason}");
                    return Ok(ExitCode::from(EXIT_NOT_FOUND));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

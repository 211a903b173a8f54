use clap::Parser;
use cvfs::api::{CmdMessage, CvfsApi};
use cvfs::config::CvfsConfig;
use cvfs::error::{CvfsError, Result};
use cvfs::store::fs::FileSnapshotStore;
use directories::ProjectDirs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

mod args;
mod cli;
mod logging;

use args::Cli;

fn main() {
    let args = Cli::parse();
    logging::set_up_logging(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<()> {
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let home = data_dir(&args)?;
    let config = match CvfsConfig::load(&home) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "config rejected");
            cli::print::print_messages(&[CmdMessage::warning(format!(
                "Ignoring unreadable config, using defaults: {}",
                e
            ))]);
            CvfsConfig::default()
        }
    };
    tracing::debug!(home = %home.display(), "starting");

    let store = FileSnapshotStore::new(home).with_ext(config.snapshot_ext());
    let mut api = CvfsApi::new(store);

    if let Some(capacity) = args.capacity.or(config.default_capacity) {
        let result = api.new_disk(capacity);
        cli::print::print_result(&result);
    }
    if let Some(name) = &args.load {
        let result = api.load(name)?;
        cli::print::print_result(&result);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    cli::run_shell(&mut api, &config, stdin.lock(), interactive)
}

fn data_dir(args: &Cli) -> Result<PathBuf> {
    if let Some(home) = &args.home {
        return Ok(home.clone());
    }
    if let Some(home) = std::env::var_os("CVFS_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "cvfs", "cvfs")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CvfsError::Usage("cannot determine a data directory, pass --home".into()))
}

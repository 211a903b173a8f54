//! Interactive shell: reads lines, dispatches them to the API, prints results.
//!
//! Errors from a command are printed and the loop goes on; only I/O errors on
//! the input stream end the session early.

use cvfs::api::CvfsApi;
use cvfs::config::CvfsConfig;
use cvfs::error::Result;
use cvfs::store::SnapshotStore;
use cvfs::tokenize::tokenize;
use std::io::{BufRead, Write};

pub mod dispatch;
pub mod print;

use dispatch::Flow;

pub fn run_shell<S, R>(
    api: &mut CvfsApi<S>,
    config: &CvfsConfig,
    input: R,
    interactive: bool,
) -> Result<()>
where
    S: SnapshotStore,
    R: BufRead,
{
    if interactive {
        println!("Welcome to the Custom Virtual File System (CVFS)");
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            print_prompt(api, config);
        }
        let Some(line) = lines.next() else {
            break;
        };
        let tokens = tokenize(&line?);
        if tokens.is_empty() {
            continue;
        }

        match dispatch::dispatch(api, &tokens) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::debug!(command = tokens[0].as_str(), kind = ?e.kind(), "command failed");
                print::print_error(&e);
            }
        }
    }
    Ok(())
}

fn print_prompt<S: SnapshotStore>(api: &CvfsApi<S>, config: &CvfsConfig) {
    match api.disk() {
        Some(disk) => print!("[{}] {}", disk.cursor_path(), config.prompt),
        None => print!("{}", config.prompt),
    }
    let _ = std::io::stdout().flush();
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cvfs", version)]
#[command(about = "In-memory virtual file system shell with undo/redo", long_about = None)]
pub struct Cli {
    /// Create a disk of this size before reading commands
    #[arg(short, long)]
    pub capacity: Option<u64>,

    /// Load this snapshot before reading commands
    #[arg(short, long)]
    pub load: Option<String>,

    /// Data directory for config and snapshots (default: $CVFS_HOME, then the platform data dir)
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

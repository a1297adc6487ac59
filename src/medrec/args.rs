use clap::{Parser, ValueEnum};
use medrec::config::Backend;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "medrec")]
#[command(about = "Console record keeper for a small clinic", long_about = None)]
#[command(version, long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("GIT_HASH"), " ", env!("GIT_COMMIT_DATE"), ")"
))]
pub struct Cli {
    /// Directory holding record files and config.json (defaults to the
    /// platform data directory)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend, overriding the configured one for this run
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BackendArg {
    File,
    Database,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::File => Backend::File,
            BackendArg::Database => Backend::Database,
        }
    }
}

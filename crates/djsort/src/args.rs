use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GlobalArgs {
    /// Do not print any log output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use verbose output.
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Write logs to this file instead of stderr.
    #[arg(global = true, long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// The request a command renders for.
#[derive(Parser, Debug, Clone)]
pub struct RequestArgs {
    /// Request path the generated links point at.
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Query string of the request, e.g. `sort=name&dir=asc`.
    #[arg(long, default_value = "")]
    pub query: String,
}

mod link;
mod render;

use std::sync::Arc;

use anyhow::Context as _;
use anyhow::Result;
use clap::Subcommand;
use djsort_conf::Settings;
use djsort_sorting::SortingConfig;
use djsort_sorting::SortingMiddleware;
use djsort_templates::Request;

use crate::args::Args;
use crate::args::RequestArgs;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum DjsortCommand {
    /// Render a template with the sorting tags available
    Render(self::render::Render),
    /// Print the link a single `{% anchor %}` tag renders
    Link(self::link::Link),
}

impl Command for DjsortCommand {
    fn execute(&self, args: &Args) -> Result<Exit> {
        match self {
            Self::Render(command) => command.execute(args),
            Self::Link(command) => command.execute(args),
        }
    }
}

/// Settings of the project in the current directory, frozen for the tags.
fn load_config() -> Result<Arc<SortingConfig>> {
    let project_root = std::env::current_dir().context("Failed to read current directory")?;
    let settings = Settings::new(&project_root).context("Failed to load settings")?;
    Ok(Arc::new(SortingConfig::from(&settings)))
}

/// The request as the sorting middleware leaves it.
fn build_request(args: &RequestArgs) -> Request {
    let mut request = Request::new(args.path.as_str(), &args.query);
    SortingMiddleware.process(&mut request);
    tracing::debug!(path = %request.path, ordering = ?request.ordering, "Built request");
    request
}

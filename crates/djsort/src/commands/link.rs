use anyhow::Result;
use clap::Parser;
use djsort_sorting::SortAnchorNode;
use djsort_templates::Context;
use djsort_templates::Node;

use crate::args::Args;
use crate::args::RequestArgs;
use crate::commands::build_request;
use crate::commands::load_config;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Link {
    /// Fields to sort by, e.g. `name` or `name,age`.
    fields: String,

    /// Link title. Defaults to the capitalized fields.
    title: Option<String>,

    #[command(flatten)]
    request: RequestArgs,
}

impl Command for Link {
    fn execute(&self, _args: &Args) -> Result<Exit> {
        let config = load_config()?;
        let node = match &self.title {
            Some(title) => SortAnchorNode::new(self.fields.as_str(), title.as_str(), config),
            None => SortAnchorNode::untitled(self.fields.as_str(), config),
        };

        let mut context = Context::new().with_request(build_request(&self.request));
        match node.render(&mut context) {
            Ok(link) => {
                println!("{link}");
                Ok(Exit::success())
            }
            Err(err) => Ok(Exit::error(format!("Render error: {err}"))),
        }
    }
}

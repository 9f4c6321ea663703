use std::fs;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use djsort_sorting::RecordSet;
use djsort_templates::Context;
use djsort_templates::Engine;
use djsort_templates::RenderError;
use djsort_templates::TemplateSyntaxError;
use djsort_templates::Value;

use crate::args::Args;
use crate::args::RequestArgs;
use crate::commands::build_request;
use crate::commands::load_config;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Render {
    /// Template file to render, or `-` to read it from stdin.
    template: PathBuf,

    #[command(flatten)]
    request: RequestArgs,

    /// JSON file whose top-level object becomes the template context.
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,

    /// Context variable holding a list of objects to expose as a sortable
    /// queryset. May be repeated.
    #[arg(long = "queryset", value_name = "NAME")]
    querysets: Vec<String>,
}

impl Command for Render {
    fn execute(&self, _args: &Args) -> Result<Exit> {
        let config = load_config()?;
        let source = read_source(&self.template)?;

        let mut engine = Engine::new();
        engine.register_library(djsort_sorting::library(config));

        let template = match engine.from_string(&source) {
            Ok(template) => template,
            Err(err) => return Ok(Exit::error(syntax_message(&self.template, &err))),
        };

        let mut context = self.build_context()?;
        context.set_request(build_request(&self.request));

        match template.render(&mut context) {
            Ok(output) => {
                print!("{output}");
                Ok(Exit::success())
            }
            Err(RenderError::NotFound(message)) => {
                Ok(Exit::not_found(format!("404 Not Found: {message}")))
            }
            Err(err) => Ok(Exit::error(format!("Render error: {err}"))),
        }
    }
}

impl Render {
    fn build_context(&self) -> Result<Context> {
        let mut context = Context::new();

        if let Some(path) = &self.context {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read context file {}", path.display()))?;
            let json: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse context file {}", path.display()))?;
            let serde_json::Value::Object(map) = json else {
                bail!("Context file {} must hold a JSON object", path.display());
            };
            for (key, value) in map {
                context.insert(key, Value::from(value));
            }
        }

        for name in &self.querysets {
            let Some(value) = context.get(name).cloned() else {
                tracing::warn!("Queryset variable '{name}' is not in the context");
                continue;
            };
            match RecordSet::from_value(value) {
                Some(records) => {
                    tracing::debug!(
                        rows = records.len(),
                        fields = ?records.fields(),
                        "Exposing '{name}' as a queryset"
                    );
                    context.insert(name.as_str(), records);
                }
                None => tracing::warn!("'{name}' is not a list of objects, leaving it as is"),
            }
        }

        Ok(context)
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read template from stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read template {}", path.display()))
}

fn syntax_message(path: &Path, err: &TemplateSyntaxError) -> String {
    match err.line() {
        Some(line) => format!("{}:{line}: TemplateSyntaxError: {err}", path.display()),
        None => format!("{}: TemplateSyntaxError: {err}", path.display()),
    }
}

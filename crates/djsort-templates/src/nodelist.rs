use std::fmt;

use crate::context::Context;
use crate::error::RenderError;
use crate::html::escape;
use crate::variable::Variable;

/// A compiled piece of a template.
pub trait Node: fmt::Debug + Send + Sync {
    fn render(&self, context: &mut Context) -> Result<String, RenderError>;
}

#[derive(Debug, Default)]
pub struct NodeList {
    nodes: Vec<Box<dyn Node>>,
}

impl NodeList {
    pub fn push(&mut self, node: Box<dyn Node>) {
        self.nodes.push(node);
    }

    pub fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&node.render(context)?);
        }
        Ok(out)
    }
}

#[derive(Debug)]
pub struct TextNode(pub String);

impl Node for TextNode {
    fn render(&self, _context: &mut Context) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}

/// `{{ var }}`: prints the value escaped; a missing variable prints nothing.
#[derive(Debug)]
pub struct VariableNode(pub Variable);

impl Node for VariableNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        match self.0.resolve(context) {
            Ok(value) => Ok(escape(&value.render())),
            Err(RenderError::VariableDoesNotExist { .. }) => Ok(String::new()),
            Err(err) => Err(err),
        }
    }
}

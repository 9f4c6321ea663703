//! Tags available in every template without a `{% load %}`.

use std::collections::BTreeMap;

use crate::context::Context;
use crate::error::RenderError;
use crate::error::TemplateSyntaxError;
use crate::nodelist::Node;
use crate::nodelist::NodeList;
use crate::parser::Library;
use crate::parser::Parser;
use crate::tokens::Token;
use crate::value::Value;
use crate::variable::Variable;

pub const LIBRARY_NAME: &str = "builtins";

#[must_use]
pub fn library() -> Library {
    Library::new(LIBRARY_NAME)
        .tag("load", compile_load)
        .tag("comment", compile_comment)
        .tag("for", compile_for)
}

/// Renders nothing. Used by tags that only act at compile time.
#[derive(Debug)]
struct EmptyNode;

impl Node for EmptyNode {
    fn render(&self, _context: &mut Context) -> Result<String, RenderError> {
        Ok(String::new())
    }
}

fn compile_load(parser: &mut Parser<'_>, token: &Token) -> Result<Box<dyn Node>, TemplateSyntaxError> {
    let bits = token.split_contents();
    if bits.len() < 2 {
        return Err(TemplateSyntaxError::new(
            "'load' statement takes at least one argument",
        ));
    }
    for name in &bits[1..] {
        parser.load(name)?;
    }
    Ok(Box::new(EmptyNode))
}

fn compile_comment(
    parser: &mut Parser<'_>,
    _token: &Token,
) -> Result<Box<dyn Node>, TemplateSyntaxError> {
    parser.skip_past("endcomment")?;
    Ok(Box::new(EmptyNode))
}

#[derive(Debug)]
struct ForNode {
    loopvar: String,
    sequence: Variable,
    reversed: bool,
    body: NodeList,
    empty: Option<NodeList>,
}

fn compile_for(parser: &mut Parser<'_>, token: &Token) -> Result<Box<dyn Node>, TemplateSyntaxError> {
    let bits = token.split_contents();
    let reversed = bits.last().is_some_and(|bit| bit == "reversed");
    let end = if reversed { bits.len() - 1 } else { bits.len() };

    if end != 4 || bits[2] != "in" {
        return Err(TemplateSyntaxError::new(format!(
            "'for' statements should use the format 'for x in y': {}",
            token.contents()
        )));
    }

    let loopvar = bits[1].clone();
    if loopvar.contains(',') || loopvar.contains('"') || loopvar.contains('\'') {
        return Err(TemplateSyntaxError::new(format!(
            "'for' tag received an invalid argument: {}",
            token.contents()
        )));
    }

    let sequence = Variable::new(bits[3].clone());
    let (body, end_token) = parser.parse_until(&["empty", "endfor"])?;
    let empty = match end_token {
        Some(end) if end.split_contents().first().map(String::as_str) == Some("empty") => {
            let (empty, end_token) = parser.parse_until(&["endfor"])?;
            if end_token.is_none() {
                return Err(unclosed_for(token));
            }
            Some(empty)
        }
        Some(_) => None,
        None => return Err(unclosed_for(token)),
    };

    Ok(Box::new(ForNode {
        loopvar,
        sequence,
        reversed,
        body,
        empty,
    }))
}

fn unclosed_for(token: &Token) -> TemplateSyntaxError {
    TemplateSyntaxError::new(format!(
        "Unclosed tag on line {}: 'for'. Looking for one of: empty, endfor.",
        token.line()
    ))
}

fn forloop(index: usize, len: usize) -> Value {
    let as_int = |n: usize| Value::Int(i64::try_from(n).unwrap_or(i64::MAX));
    Value::Map(BTreeMap::from([
        ("counter".to_string(), as_int(index + 1)),
        ("counter0".to_string(), as_int(index)),
        ("first".to_string(), Value::Bool(index == 0)),
        ("last".to_string(), Value::Bool(index + 1 == len)),
    ]))
}

impl Node for ForNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let mut items = match self.sequence.resolve(context) {
            Ok(value) => value.iter_items().unwrap_or_default(),
            Err(RenderError::VariableDoesNotExist { .. }) => Vec::new(),
            Err(err) => return Err(err),
        };

        if items.is_empty() {
            return match &self.empty {
                Some(empty) => empty.render(context),
                None => Ok(String::new()),
            };
        }
        if self.reversed {
            items.reverse();
        }

        let len = items.len();
        let mut out = String::new();
        context.push();
        for (index, item) in items.into_iter().enumerate() {
            context.insert(self.loopvar.clone(), item);
            context.insert("forloop", forloop(index, len));
            match self.body.render(context) {
                Ok(rendered) => out.push_str(&rendered),
                Err(err) => {
                    context.pop();
                    return Err(err);
                }
            }
        }
        context.pop();
        Ok(out)
    }
}

//! A small Django-syntax template engine for hosting custom tags.
//!
//! Supports text, `{{ variable }}` output, `{# comments #}`, and block tags
//! compiled through registered [`Library`] sets. Only `load`, `for` and
//! `comment` are built in; everything else comes from libraries.
//!
//! ## Pipeline
//!
//! 1. **Lexing**: template text is split into text, variable, block and comment tokens
//! 2. **Compiling**: the [`Parser`] turns tokens into a [`NodeList`], dispatching each
//!    block tag to the [`TagCompiler`] registered under its name
//! 3. **Rendering**: each [`Node`] renders against a [`Context`], which carries
//!    the variables and the current [`Request`]
//!
//! ## Example
//!
//! ```
//! use djsort_templates::{Context, Engine, Value};
//!
//! let template = Engine::new()
//!     .from_string("{% for n in names %}{{ n }} {% endfor %}")
//!     .unwrap();
//! let mut context = Context::new();
//! context.insert("names", Value::List(vec!["a".into(), "b".into()]));
//! assert_eq!(template.render(&mut context).unwrap(), "a b ");
//! ```

mod builtins;
mod context;
mod engine;
mod error;
pub mod html;
mod lexer;
mod nodelist;
mod parser;
mod quotes;
mod request;
mod tokens;
mod value;
mod variable;

pub use context::Context;
pub use engine::Engine;
pub use engine::Template;
pub use error::FieldError;
pub use error::RenderError;
pub use error::TemplateSyntaxError;
pub use lexer::Lexer;
pub use nodelist::Node;
pub use nodelist::NodeList;
pub use parser::Library;
pub use parser::Parser;
pub use parser::TagCompiler;
pub use quotes::strip_quotes;
pub use request::QueryDict;
pub use request::Request;
pub use tokens::Token;
pub use tokens::TokenKind;
pub use value::QuerySet;
pub use value::Value;
pub use variable::Variable;

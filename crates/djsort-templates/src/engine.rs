use std::collections::BTreeMap;

use crate::builtins;
use crate::context::Context;
use crate::error::RenderError;
use crate::error::TemplateSyntaxError;
use crate::lexer::Lexer;
use crate::nodelist::NodeList;
use crate::parser::Library;
use crate::parser::Parser;

/// Holds the tag libraries and compiles templates against them.
#[derive(Debug)]
pub struct Engine {
    builtins: Vec<Library>,
    libraries: BTreeMap<String, Library>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builtins: vec![builtins::library()],
            libraries: BTreeMap::new(),
        }
    }

    /// Make a library's tags available in every template.
    pub fn add_builtin(&mut self, library: Library) {
        self.builtins.push(library);
    }

    /// Make a library available to `{% load %}`.
    pub fn register_library(&mut self, library: Library) {
        self.libraries.insert(library.name().to_string(), library);
    }

    pub fn from_string(&self, source: &str) -> Result<Template, TemplateSyntaxError> {
        let tokens = Lexer::new(source).tokenize();
        let nodelist = Parser::new(tokens, &self.builtins, &self.libraries).parse()?;
        Ok(Template { nodelist })
    }
}

#[derive(Debug)]
pub struct Template {
    nodelist: NodeList,
}

impl Template {
    /// Render against `context`. Tags may replace entries in the context's
    /// innermost scope; those replacements remain visible afterwards.
    pub fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        self.nodelist.render(context)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::value::Value;

    fn render(source: &str, context: &mut Context) -> String {
        Engine::new()
            .from_string(source)
            .unwrap()
            .render(context)
            .unwrap()
    }

    mod for_tag {
        use super::*;

        #[test]
        fn test_iterates_list() {
            let mut context = Context::new();
            context.insert("names", Value::from(json!(["Ann", "Bob"])));
            let out = render(
                "{% for name in names %}{{ forloop.counter }}:{{ name }}{% endfor %}",
                &mut context,
            );
            assert_eq!(out, "1:Ann2:Bob");
        }

        #[test]
        fn test_reversed_and_scope() {
            let mut context = Context::new();
            context.insert("names", Value::from(json!(["Ann", "Bob"])));
            context.insert("name", "outer");
            let out = render(
                "{% for name in names reversed %}{{ name }},{% endfor %}{{ name }}",
                &mut context,
            );
            assert_eq!(out, "Bob,Ann,outer");
        }

        #[test]
        fn test_empty_branch() {
            let mut context = Context::new();
            let out = render(
                "{% for x in missing %}{{ x }}{% empty %}none{% endfor %}",
                &mut context,
            );
            assert_eq!(out, "none");
        }

        #[test]
        fn test_unclosed() {
            let err = Engine::new()
                .from_string("{% for x in y %}{{ x }}")
                .unwrap_err();
            assert_eq!(
                err.message(),
                "Unclosed tag on line 1: 'for'. Looking for one of: empty, endfor."
            );
        }

        #[test]
        fn test_bad_syntax() {
            assert!(Engine::new().from_string("{% for x y %}{% endfor %}").is_err());
            assert!(Engine::new().from_string("{% for a,b in y %}{% endfor %}").is_err());
        }
    }

    mod load_tag {
        use super::*;

        #[test]
        fn test_unknown_library() {
            let err = Engine::new().from_string("{% load nope %}").unwrap_err();
            assert!(err.message().starts_with("'nope' is not a registered tag library"));
        }

        #[test]
        fn test_load_without_argument() {
            let err = Engine::new().from_string("{% load %}").unwrap_err();
            assert_eq!(err.message(), "'load' statement takes at least one argument");
        }

        #[test]
        fn test_loaded_library_is_usable() {
            let mut engine = Engine::new();
            engine.register_library(builtins::library());
            let mut context = Context::new();
            let out = engine
                .from_string("{% load builtins %}ok")
                .unwrap()
                .render(&mut context)
                .unwrap();
            assert_eq!(out, "ok");
        }
    }

    #[test]
    fn test_comment_block() {
        let mut context = Context::new();
        let out = render(
            "a{% comment %}{% not_a_tag %}{% endcomment %}b",
            &mut context,
        );
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_unclosed_comment() {
        assert!(Engine::new().from_string("{% comment %}x").is_err());
    }
}

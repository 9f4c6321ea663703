use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::TemplateSyntaxError;
use crate::nodelist::Node;
use crate::nodelist::NodeList;
use crate::nodelist::TextNode;
use crate::nodelist::VariableNode;
use crate::tokens::Token;
use crate::tokens::TokenKind;
use crate::variable::Variable;

/// Compiles one `{% tag ... %}` occurrence into a node.
///
/// Block tags use the parser to consume their body up to the closing tag.
pub type TagCompiler =
    Arc<dyn Fn(&mut Parser<'_>, &Token) -> Result<Box<dyn Node>, TemplateSyntaxError> + Send + Sync>;

/// A named set of tags, made available to a template by `{% load name %}`
/// or by registering it as a builtin.
#[derive(Clone)]
pub struct Library {
    name: String,
    tags: BTreeMap<String, TagCompiler>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn tag<F>(mut self, name: impl Into<String>, compiler: F) -> Self
    where
        F: Fn(&mut Parser<'_>, &Token) -> Result<Box<dyn Node>, TemplateSyntaxError>
            + Send
            + Sync
            + 'static,
    {
        self.tags.insert(name.into(), Arc::new(compiler));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn compiler(&self, name: &str) -> Option<&TagCompiler> {
        self.tags.get(name)
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct Parser<'e> {
    tokens: Vec<Token>,
    current: usize,
    libraries: &'e BTreeMap<String, Library>,
    tags: BTreeMap<String, TagCompiler>,
}

impl<'e> Parser<'e> {
    pub(crate) fn new(
        tokens: Vec<Token>,
        builtins: &[Library],
        libraries: &'e BTreeMap<String, Library>,
    ) -> Self {
        let tags = builtins
            .iter()
            .flat_map(|library| library.tags.iter())
            .map(|(name, compiler)| (name.clone(), Arc::clone(compiler)))
            .collect();

        Self {
            tokens,
            current: 0,
            libraries,
            tags,
        }
    }

    pub fn parse(&mut self) -> Result<NodeList, TemplateSyntaxError> {
        let (nodelist, _) = self.parse_until(&[])?;
        Ok(nodelist)
    }

    /// Compile tokens until a block tag named in `ends` is reached.
    ///
    /// Returns the compiled nodes and the end token, or `None` when the
    /// template ran out first. The caller decides whether that is an error.
    pub fn parse_until(
        &mut self,
        ends: &[&str],
    ) -> Result<(NodeList, Option<Token>), TemplateSyntaxError> {
        let mut nodelist = NodeList::default();

        while let Some(token) = self.next_token() {
            let line = token.line();
            match token.kind() {
                TokenKind::Text(text) => nodelist.push(Box::new(TextNode(text.clone()))),
                TokenKind::Comment(_) => {}
                TokenKind::Variable(var) => {
                    if var.is_empty() {
                        return Err(TemplateSyntaxError::new(format!(
                            "Empty variable tag on line {line}"
                        ))
                        .at_line(line));
                    }
                    nodelist.push(Box::new(VariableNode(Variable::new(var.clone()))));
                }
                TokenKind::Error(contents) => {
                    return Err(TemplateSyntaxError::new(format!(
                        "Unclosed template construct on line {line}: '{contents}'"
                    ))
                    .at_line(line));
                }
                TokenKind::Block(_) => {
                    let bits = token.split_contents();
                    let Some(name) = bits.first() else {
                        return Err(TemplateSyntaxError::new(format!(
                            "Empty block tag on line {line}"
                        ))
                        .at_line(line));
                    };

                    if ends.contains(&name.as_str()) {
                        return Ok((nodelist, Some(token)));
                    }

                    let Some(compiler) = self.tags.get(name).cloned() else {
                        return Err(Self::invalid_block_tag(name, ends, line));
                    };

                    tracing::trace!(tag = %name, line, "Compiling tag");
                    let node = compiler(self, &token).map_err(|err| err.at_line(line))?;
                    nodelist.push(node);
                }
            }
        }

        Ok((nodelist, None))
    }

    /// Discard tokens up to and including the block tag `end`.
    pub fn skip_past(&mut self, end: &str) -> Result<(), TemplateSyntaxError> {
        while let Some(token) = self.next_token() {
            if matches!(token.kind(), TokenKind::Block(_))
                && token.split_contents().first().map(String::as_str) == Some(end)
            {
                return Ok(());
            }
        }
        Err(TemplateSyntaxError::new(format!(
            "Unclosed tag. Looking for one of: {end}."
        )))
    }

    /// Make every tag of the registered library `name` available from here on.
    pub fn load(&mut self, name: &str) -> Result<(), TemplateSyntaxError> {
        let Some(library) = self.libraries.get(name) else {
            let known: Vec<&str> = self.libraries.keys().map(String::as_str).collect();
            return Err(TemplateSyntaxError::new(format!(
                "'{name}' is not a registered tag library. Must be one of:\n{}",
                known.join("\n")
            )));
        };

        for (tag, compiler) in &library.tags {
            self.tags.insert(tag.clone(), Arc::clone(compiler));
        }
        Ok(())
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn invalid_block_tag(name: &str, ends: &[&str], line: usize) -> TemplateSyntaxError {
        let message = if ends.is_empty() {
            format!(
                "Invalid block tag on line {line}: '{name}'. Did you forget to register or load this tag?"
            )
        } else {
            let expected: Vec<String> = ends.iter().map(|end| format!("'{end}'")).collect();
            format!(
                "Invalid block tag on line {line}: '{name}', expected {}. Did you forget to register or load this tag?",
                expected.join(" or ")
            )
        };
        TemplateSyntaxError::new(message).at_line(line)
    }
}

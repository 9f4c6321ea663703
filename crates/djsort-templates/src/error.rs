use thiserror::Error;

/// Compile-time failure: a malformed tag, an unknown tag, or an unclosed block.
///
/// Fatal to compiling the template it occurs in.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TemplateSyntaxError {
    message: String,
    line: Option<usize>,
}

impl TemplateSyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Attach a line number unless one was already recorded.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The page should be answered with a 404.
    #[error("{0}")]
    NotFound(String),

    #[error("Failed lookup for key [{variable}]")]
    VariableDoesNotExist { variable: String },

    /// The tag needs the current request but the context carries none.
    #[error("Rendering context has no request")]
    MissingRequest,

    #[error("'{variable}' does not support ordering")]
    NotOrderable { variable: String },
}

/// A queryset was asked to order by a field it does not have.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Cannot resolve keyword '{field}' into field. Choices are: {}", .choices.join(", "))]
pub struct FieldError {
    pub field: String,
    pub choices: Vec<String>,
}

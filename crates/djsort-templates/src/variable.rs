use crate::context::Context;
use crate::error::RenderError;
use crate::quotes::unquote;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
enum Kind {
    Literal(Value),
    Lookup(Vec<String>),
}

/// A reference appearing in a template: a literal or a dotted lookup.
///
/// - `"text"` / `'text'` are string literals
/// - `12`, `-3`, `1.5` are numeric literals
/// - `_("text")` is a translatable literal; translation is the identity here
/// - anything else (`user.name`, `rows.0`) is looked up in the context
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    var: String,
    kind: Kind,
}

impl Variable {
    pub fn new(var: impl Into<String>) -> Self {
        let var = var.into();
        let kind = Self::classify(var.trim());
        Self { var, kind }
    }

    fn classify(var: &str) -> Kind {
        if let Some(number) = Self::parse_number(var) {
            return Kind::Literal(number);
        }

        let translated = var
            .strip_prefix("_(")
            .and_then(|rest| rest.strip_suffix(')'));
        if let Some(inner) = translated {
            let inner = inner.trim();
            return Kind::Literal(Value::from(unquote(inner).unwrap_or(inner)));
        }

        if let Some(text) = unquote(var) {
            return Kind::Literal(Value::from(text));
        }

        Kind::Lookup(var.split('.').map(str::to_string).collect())
    }

    fn parse_number(var: &str) -> Option<Value> {
        let digits = var.strip_prefix(['-', '+']).unwrap_or(var);
        let starts_numeric = digits
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '.');
        if !starts_numeric {
            return None;
        }
        if let Ok(int) = var.parse::<i64>() {
            return Some(Value::Int(int));
        }
        var.parse::<f64>().ok().map(Value::Float)
    }

    /// The text the variable was created from.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    pub fn resolve(&self, context: &Context) -> Result<Value, RenderError> {
        let missing = || RenderError::VariableDoesNotExist {
            variable: self.var.clone(),
        };

        match &self.kind {
            Kind::Literal(value) => Ok(value.clone()),
            Kind::Lookup(path) => {
                let (head, rest) = path.split_first().ok_or_else(missing)?;
                let mut current = context.get(head).cloned().ok_or_else(missing)?;
                for segment in rest {
                    current = current.lookup(segment).ok_or_else(missing)?;
                }
                Ok(current)
            }
        }
    }
}

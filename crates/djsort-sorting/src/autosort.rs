use std::sync::Arc;

use djsort_templates::strip_quotes;
use djsort_templates::Context;
use djsort_templates::Node;
use djsort_templates::RenderError;
use djsort_templates::TemplateSyntaxError;
use djsort_templates::Token;
use djsort_templates::Value;
use djsort_templates::Variable;

use crate::config::SortingConfig;

/// `{% autosort queryset %}`
///
/// Reorders the context entry `queryset` by the request's ordering fields.
/// Renders nothing.
#[derive(Debug)]
pub struct SortedDataNode {
    queryset_var: Variable,
    config: Arc<SortingConfig>,
}

impl SortedDataNode {
    pub fn new(queryset_var: impl Into<String>, config: Arc<SortingConfig>) -> Self {
        Self {
            queryset_var: Variable::new(queryset_var),
            config,
        }
    }

    pub fn from_token(token: &Token, config: Arc<SortingConfig>) -> Result<Self, TemplateSyntaxError> {
        let bits = token.split_contents();
        if bits.len() != 2 {
            return Err(TemplateSyntaxError::new(
                "autosort tag takes exactly one argument",
            ));
        }
        Ok(Self::new(strip_quotes(&bits[1]), config))
    }

    fn order(&self, value: Value, ordering: &[String]) -> Result<Value, RenderError> {
        let Value::QuerySet(queryset) = &value else {
            return Err(RenderError::NotOrderable {
                variable: self.queryset_var.var().to_string(),
            });
        };

        match queryset.order_by(ordering) {
            Ok(ordered) => Ok(Value::QuerySet(ordered)),
            Err(err) if self.config.invalid_field_raises_404() => {
                tracing::debug!(error = %err, "Invalid sort field, raising not found");
                Err(RenderError::NotFound(
                    "Invalid field sorting. If DEBUG were set to False, an HTTP 404 page would have been shown instead."
                        .to_string(),
                ))
            }
            Err(err) => {
                tracing::debug!(error = %err, "Invalid sort field, leaving collection unsorted");
                Ok(value)
            }
        }
    }
}

impl Node for SortedDataNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let key = self.queryset_var.var().to_string();
        let value = self.queryset_var.resolve(context)?;
        let ordering = context
            .request()
            .ok_or(RenderError::MissingRequest)?
            .ordering
            .clone();

        let value = if ordering.is_empty() {
            value
        } else {
            self.order(value, &ordering)?
        };

        context.insert(key, value);
        Ok(String::new())
    }
}

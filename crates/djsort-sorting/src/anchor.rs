use std::sync::Arc;

use djsort_templates::html::strip_tags;
use djsort_templates::strip_quotes;
use djsort_templates::Context;
use djsort_templates::Node;
use djsort_templates::RenderError;
use djsort_templates::Request;
use djsort_templates::TemplateSyntaxError;
use djsort_templates::Token;
use djsort_templates::Variable;

use crate::config::SortingConfig;
use crate::direction::SortDirection;

/// `{% anchor fields [title] %}`
///
/// Renders a link to the current path that sorts by `fields`, keeping every
/// other query parameter. When `fields` is the active sort, the link flips
/// the direction and the title carries the current direction's icon.
///
/// ```django
/// {% anchor name Name %}
/// <a href="/the/current/path/?sort=name" title="Name">Name</a>
///
/// {% anchor name,title Name %}
/// <a href="/the/current/path/?sort=name,title" title="Name">Name</a>
/// ```
///
/// The title is resolved as a template variable at render time, so
/// `{% anchor name _("Name") %}` and `{% anchor name heading %}` both work.
/// A title that does not resolve is used as written.
#[derive(Debug)]
pub struct SortAnchorNode {
    fields: String,
    title: String,
    config: Arc<SortingConfig>,
}

impl SortAnchorNode {
    pub fn new(
        fields: impl Into<String>,
        title: impl Into<String>,
        config: Arc<SortingConfig>,
    ) -> Self {
        Self {
            fields: fields.into(),
            title: title.into(),
            config,
        }
    }

    /// An anchor titled after its fields, as `{% anchor fields %}` would be.
    pub fn untitled(fields: impl Into<String>, config: Arc<SortingConfig>) -> Self {
        let fields = fields.into();
        let title = capitalize(&fields);
        Self::new(fields.trim(), title.trim(), config)
    }

    pub fn from_token(token: &Token, config: Arc<SortingConfig>) -> Result<Self, TemplateSyntaxError> {
        let bits: Vec<String> = token
            .split_contents()
            .iter()
            .map(|bit| strip_quotes(bit).to_string())
            .collect();

        if bits.len() < 2 {
            return Err(TemplateSyntaxError::new(
                "anchor tag takes at least 1 argument",
            ));
        }

        let title = bits
            .get(2)
            .cloned()
            .unwrap_or_else(|| capitalize(&bits[1]));

        Ok(Self::new(bits[1].trim(), title.trim(), config))
    }

    #[must_use]
    pub fn fields(&self) -> &str {
        &self.fields
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    fn resolve_title(&self, context: &Context) -> String {
        match Variable::new(self.title.as_str()).resolve(context) {
            Ok(value) => value.render(),
            Err(_) => self.title.clone(),
        }
    }

    /// Build the `<a>` element for `request` with an already-resolved title.
    #[must_use]
    pub fn link(&self, request: &Request, title: &str) -> String {
        let mut getvars = request.get.clone();
        let sortby = getvars.pop("sort").unwrap_or_default();
        let sortdir = getvars.pop("dir").unwrap_or_default();

        let icon = if sortby == self.fields {
            let direction = SortDirection::parse(&sortdir);
            getvars.set("dir", direction.inverse().as_str());
            direction.icon(&self.config)
        } else {
            ""
        };

        let urlappend = if getvars.is_empty() {
            String::new()
        } else {
            format!("&{}", getvars.urlencode())
        };

        let visible = if icon.is_empty() {
            title.to_string()
        } else {
            format!("{title} {icon}")
        };

        let url = format!("{}?sort={}{}", request.path, self.fields, urlappend);
        tracing::trace!(fields = %self.fields, active = !icon.is_empty(), %url, "Rendered sort anchor");

        format!(
            r#"<a href="{url}" title="{}">{visible}</a>"#,
            strip_tags(title)
        )
    }
}

impl Node for SortAnchorNode {
    fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        let context: &Context = context;
        let request = context.request().ok_or(RenderError::MissingRequest)?;
        let title = self.resolve_title(context);
        Ok(self.link(request, &title))
    }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Arc<SortingConfig> {
        Arc::new(SortingConfig::default())
    }

    fn render(tag: &str, uri: &str) -> String {
        let node = SortAnchorNode::from_token(&Token::block(tag), config()).unwrap();
        let mut context = Context::new().with_request(Request::from_uri(uri));
        node.render(&mut context).unwrap()
    }

    mod parse {
        use super::*;

        #[test]
        fn test_fields_and_title() {
            let node =
                SortAnchorNode::from_token(&Token::block("anchor name Name"), config()).unwrap();
            assert_eq!(node.fields(), "name");
            assert_eq!(node.title(), "Name");
        }

        #[test]
        fn test_quoted_title() {
            let node =
                SortAnchorNode::from_token(&Token::block(r#"anchor "name" "Full name""#), config())
                    .unwrap();
            assert_eq!(node.fields(), "name");
            assert_eq!(node.title(), "Full name");
        }

        #[test]
        fn test_title_defaults_to_capitalized_fields() {
            let node =
                SortAnchorNode::from_token(&Token::block("anchor first_NAME"), config()).unwrap();
            assert_eq!(node.title(), "First_name");
        }

        #[test]
        fn test_untitled() {
            let node = SortAnchorNode::untitled("name,age", config());
            assert_eq!(node.fields(), "name,age");
            assert_eq!(node.title(), "Name,age");
        }

        #[test]
        fn test_untitled_matches_tag() {
            let node = SortAnchorNode::untitled(" name ", config());
            let tag = SortAnchorNode::from_token(&Token::block(r#"anchor " name ""#), config())
                .unwrap();
            assert_eq!(node.fields(), "name");
            assert_eq!(node.fields(), tag.fields());
            assert_eq!(node.title(), tag.title());
        }

        #[test]
        fn test_extra_bits_ignored() {
            let node = SortAnchorNode::from_token(
                &Token::block("anchor name Name something else"),
                config(),
            )
            .unwrap();
            assert_eq!(node.title(), "Name");
        }

        #[test]
        fn test_missing_fields() {
            let err = SortAnchorNode::from_token(&Token::block("anchor"), config()).unwrap_err();
            assert_eq!(err.message(), "anchor tag takes at least 1 argument");
        }
    }

    mod render {
        use super::*;

        #[test]
        fn test_inactive_without_query() {
            insta::assert_snapshot!(
                render("anchor name Name", "/list/"),
                @r#"<a href="/list/?sort=name" title="Name">Name</a>"#
            );
        }

        #[test]
        fn test_active_ascending_flips_to_descending() {
            insta::assert_snapshot!(
                render("anchor name Name", "/list/?sort=name&dir=asc"),
                @r#"<a href="/list/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
            );
        }

        #[test]
        fn test_active_descending_flips_to_ascending() {
            assert_eq!(
                render("anchor name Name", "/list/?sort=name&dir=desc"),
                r#"<a href="/list/?sort=name&dir=asc" title="Name">Name &darr;</a>"#
            );
        }

        #[test]
        fn test_active_without_direction() {
            assert_eq!(
                render("anchor name Name", "/list/?sort=name"),
                r#"<a href="/list/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
            );
        }

        #[test]
        fn test_unrecognized_direction_reads_as_unset() {
            assert_eq!(
                render("anchor name Name", "/list/?sort=name&dir=sideways"),
                r#"<a href="/list/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
            );
        }

        #[test]
        fn test_other_column_active() {
            assert_eq!(
                render("anchor age Age", "/list/?sort=name&dir=asc"),
                r#"<a href="/list/?sort=age" title="Age">Age</a>"#
            );
        }

        #[test]
        fn test_preserves_other_parameters() {
            assert_eq!(
                render("anchor age Age", "/list/?page=2&q=red+shoes&sort=name"),
                r#"<a href="/list/?sort=age&page=2&q=red+shoes" title="Age">Age</a>"#
            );
            assert_eq!(
                render("anchor name Name", "/list/?page=2&sort=name&dir=asc&q=x"),
                r#"<a href="/list/?sort=name&page=2&q=x&dir=desc" title="Name">Name &uarr;</a>"#
            );
        }

        #[test]
        fn test_multi_field_exact_match() {
            assert_eq!(
                render("anchor name,age Person", "/list/?sort=name,age&dir=desc"),
                r#"<a href="/list/?sort=name,age&dir=asc" title="Person">Person &darr;</a>"#
            );
            assert_eq!(
                render("anchor name,age Person", "/list/?sort=name"),
                r#"<a href="/list/?sort=name,age" title="Person">Person</a>"#
            );
        }

        #[test]
        fn test_title_from_context_variable() {
            let node =
                SortAnchorNode::from_token(&Token::block("anchor name heading"), config()).unwrap();
            let mut context = Context::new().with_request(Request::from_uri("/"));
            context.insert("heading", "<b>Name</b>");
            assert_eq!(
                node.render(&mut context).unwrap(),
                r#"<a href="/?sort=name" title="Name"><b>Name</b></a>"#
            );
        }

        #[test]
        fn test_translated_title() {
            assert_eq!(
                render(r#"anchor name _("Full name")"#, "/"),
                r#"<a href="/?sort=name" title="Full name">Full name</a>"#
            );
        }

        #[test]
        fn test_custom_icons() {
            let config = Arc::new(SortingConfig::new("^", "v", false));
            let node = SortAnchorNode::new("name", "Name", config);
            let request = Request::from_uri("/?sort=name&dir=desc");
            assert_eq!(
                node.link(&request, "Name"),
                r#"<a href="/?sort=name&dir=asc" title="Name">Name v</a>"#
            );
        }

        #[test]
        fn test_empty_icon_is_not_appended() {
            let config = Arc::new(SortingConfig::new("", "", false));
            let node = SortAnchorNode::new("name", "Name", config);
            let request = Request::from_uri("/?sort=name&dir=asc");
            assert_eq!(
                node.link(&request, "Name"),
                r#"<a href="/?sort=name&dir=desc" title="Name">Name</a>"#
            );
        }

        #[test]
        fn test_request_is_not_mutated() {
            let node = SortAnchorNode::new("name", "Name", config());
            let request = Request::from_uri("/?sort=name&dir=asc&page=3");
            let before = request.clone();
            node.link(&request, "Name");
            assert_eq!(request, before);
        }

        #[test]
        fn test_idempotent() {
            let first = render("anchor name Name", "/list/?sort=name&dir=asc&page=2");
            let second = render("anchor name Name", "/list/?sort=name&dir=asc&page=2");
            assert_eq!(first, second);
        }

        #[test]
        fn test_missing_request() {
            let node = SortAnchorNode::new("name", "Name", config());
            let err = node.render(&mut Context::new()).unwrap_err();
            assert_eq!(err, RenderError::MissingRequest);
        }
    }
}

use std::sync::Arc;

use djsort_sorting::library;
use djsort_sorting::RecordSet;
use djsort_sorting::SortingConfig;
use djsort_sorting::SortingMiddleware;
use djsort_templates::Context;
use djsort_templates::Engine;
use djsort_templates::RenderError;
use djsort_templates::Request;
use djsort_templates::Value;
use serde_json::json;

const TABLE: &str = "{% load sorting_tags %}{% autosort people %}\
<tr><th>{% anchor name Name %}</th><th>{% anchor age Age %}</th></tr>\
{% for person in people %}<tr><td>{{ person.name }}</td><td>{{ person.age }}</td></tr>{% endfor %}";

fn engine(strict: bool) -> Engine {
    let mut engine = Engine::new();
    engine.register_library(library(Arc::new(SortingConfig::new(
        "&uarr;", "&darr;", strict,
    ))));
    engine
}

fn context(uri: &str) -> Context {
    let mut request = Request::from_uri(uri);
    SortingMiddleware.process(&mut request);
    let mut context = Context::new().with_request(request);
    let people = RecordSet::from_value(Value::from(json!([
        {"name": "Cleo", "age": 30},
        {"name": "Abe", "age": 41},
        {"name": "Bea", "age": 25},
    ])))
    .unwrap();
    context.insert("people", people);
    context
}

fn render(source: &str, uri: &str, strict: bool) -> Result<String, RenderError> {
    let template = engine(strict).from_string(source).unwrap();
    template.render(&mut context(uri))
}

fn rows(html: &str) -> Vec<&str> {
    html.split("<td>")
        .skip(1)
        .step_by(2)
        .filter_map(|cell| cell.split("</td>").next())
        .collect()
}

mod compile {
    use super::*;

    #[test]
    fn tags_need_load() {
        let err = Engine::new()
            .from_string("{% anchor name Name %}")
            .unwrap_err();
        assert!(err.message().contains("'anchor'"));
    }

    #[test]
    fn anchor_without_fields() {
        let err = engine(false)
            .from_string("{% load sorting_tags %}\n{% anchor %}")
            .unwrap_err();
        assert_eq!(err.message(), "anchor tag takes at least 1 argument");
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn autosort_argument_count() {
        for source in [
            "{% load sorting_tags %}{% autosort %}",
            "{% load sorting_tags %}{% autosort a b %}",
        ] {
            let err = engine(false).from_string(source).unwrap_err();
            assert_eq!(err.message(), "autosort tag takes exactly one argument");
        }
    }
}

mod anchors {
    use super::*;

    #[test]
    fn plain_listing() {
        let html = render("{% load sorting_tags %}{% anchor name Name %}", "/list/", false).unwrap();
        assert_eq!(html, r#"<a href="/list/?sort=name" title="Name">Name</a>"#);
    }

    #[test]
    fn active_column_toggles() {
        let html = render(
            "{% load sorting_tags %}{% anchor name Name %}",
            "/list/?sort=name&dir=asc",
            false,
        )
        .unwrap();
        assert_eq!(
            html,
            r#"<a href="/list/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#
        );
    }

    #[test]
    fn rerendering_is_byte_identical() {
        let template = engine(false)
            .from_string("{% load sorting_tags %}{% anchor name Name %}{% anchor age %}")
            .unwrap();
        let mut context = context("/list/?sort=age&dir=desc&page=4");
        let first = template.render(&mut context).unwrap();
        let second = template.render(&mut context).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            concat!(
                r#"<a href="/list/?sort=name&page=4" title="Name">Name</a>"#,
                r#"<a href="/list/?sort=age&page=4&dir=asc" title="Age">Age &darr;</a>"#,
            )
        );
    }
}

mod autosort {
    use super::*;

    #[test]
    fn unsorted_without_parameters() {
        let html = render(TABLE, "/people/", false).unwrap();
        assert_eq!(rows(&html), ["Cleo", "Abe", "Bea"]);
    }

    #[test]
    fn sorted_by_requested_field() {
        let html = render(TABLE, "/people/?sort=name&dir=asc", false).unwrap();
        assert_eq!(rows(&html), ["Abe", "Bea", "Cleo"]);
        assert!(html.contains(r#"<a href="/people/?sort=name&dir=desc" title="Name">Name &uarr;</a>"#));
        assert!(html.contains(r#"<a href="/people/?sort=age" title="Age">Age</a>"#));
    }

    #[test]
    fn sorted_descending() {
        let html = render(TABLE, "/people/?sort=age&dir=desc", false).unwrap();
        assert_eq!(rows(&html), ["Abe", "Cleo", "Bea"]);
    }

    #[test]
    fn invalid_field_lenient() {
        let html = render(TABLE, "/people/?sort=notareal_field", false).unwrap();
        assert_eq!(rows(&html), ["Cleo", "Abe", "Bea"]);
    }

    #[test]
    fn invalid_field_strict() {
        let err = render(TABLE, "/people/?sort=notareal_field", true).unwrap_err();
        assert!(matches!(err, RenderError::NotFound(_)));
    }

    #[test]
    fn missing_request() {
        let template = engine(false).from_string(TABLE).unwrap();
        let mut context = Context::new();
        context.insert("people", Value::List(Vec::new()));
        assert_eq!(
            template.render(&mut context).unwrap_err(),
            RenderError::MissingRequest
        );
    }
}

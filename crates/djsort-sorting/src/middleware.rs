use djsort_templates::QueryDict;
use djsort_templates::Request;

use crate::direction::SortDirection;

/// Fills [`Request::ordering`] from the `sort` and `dir` query parameters.
///
/// Must run before any template using `{% autosort %}` renders; the tag only
/// reads the field list, it never parses the query string itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct SortingMiddleware;

impl SortingMiddleware {
    pub fn process(self, request: &mut Request) {
        request.ordering = ordering_fields(&request.get);
    }
}

/// Ordering fields requested by a query string.
///
/// `sort` is a comma-separated field list. With `dir=desc` every field is
/// negated, so `sort=name,-age&dir=desc` orders by `-name, age`.
#[must_use]
pub fn ordering_fields(get: &QueryDict) -> Vec<String> {
    let Some(sort) = get.get("sort") else {
        return Vec::new();
    };
    let direction = SortDirection::parse(get.get("dir").unwrap_or_default());

    sort.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| match direction {
            SortDirection::Descending => match field.strip_prefix('-') {
                Some(ascending) => ascending.to_string(),
                None => format!("-{field}"),
            },
            SortDirection::Ascending | SortDirection::Unset => field.to_string(),
        })
        .collect()
}

use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Bytes left alone by form encoding. Space is kept here and turned into `+`
/// afterwards.
const FORM_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b' ');

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, FORM_SAFE).to_string().replace(' ', "+")
}

fn decode_component(s: &str) -> String {
    percent_decode_str(&s.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Ordered multimap of query-string parameters.
///
/// Keys keep the position of their first appearance. Reading a key yields its
/// last value, the way a form field submitted twice resolves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDict {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryDict {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    ///
    /// Blank values are kept; a pair without `=` is a key with an empty value.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut dict = Self::new();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            dict.append(decode_component(key), decode_component(value));
        }
        dict
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Last value submitted for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_list(key).last().map(String::as_str)
    }

    #[must_use]
    pub fn get_list(&self, key: &str) -> &[String] {
        match self.position(key) {
            Some(idx) => &self.entries[idx].1,
            None => &[],
        }
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Remove `key` and return its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Remove `key` and return its last value.
    pub fn pop(&mut self, key: &str) -> Option<String> {
        self.remove(key).and_then(|mut values| values.pop())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize every key/value pair, in order, form-encoded.
    #[must_use]
    pub fn urlencode(&self) -> String {
        self.entries
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| format!("{}={}", encode_component(key), encode_component(value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The slice of an HTTP request the sorting tags read.
///
/// `ordering` is not derived from the query string by this type; the sorting
/// middleware fills it in before rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub get: QueryDict,
    pub ordering: Vec<String>,
}

impl Request {
    #[must_use]
    pub fn new(path: impl Into<String>, query: &str) -> Self {
        Self {
            path: path.into(),
            get: QueryDict::parse(query),
            ordering: Vec::new(),
        }
    }

    /// Build a request from a path with an optional `?query` suffix.
    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        Self::new(path, query)
    }
}

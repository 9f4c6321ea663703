use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use djsort_templates::FieldError;
use djsort_templates::QuerySet;
use djsort_templates::Value;

type Row = BTreeMap<String, Value>;

/// In-memory queryset: rows of named fields with a declared field list.
///
/// Ordering by a field outside the declared list fails the way an ORM rejects
/// an unknown column, even if some row happens to carry that key.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSet {
    fields: Vec<String>,
    rows: Vec<Row>,
}

impl RecordSet {
    #[must_use]
    pub fn new(fields: Vec<String>, rows: Vec<Row>) -> Self {
        Self { fields, rows }
    }

    /// Build from a list of maps; the declared fields are every key seen.
    ///
    /// Returns `None` unless `value` is a list whose items are all maps.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        let rows = items
            .into_iter()
            .map(|item| match item {
                Value::Map(row) => Some(row),
                _ => None,
            })
            .collect::<Option<Vec<Row>>>()?;

        let fields: BTreeSet<&String> = rows.iter().flat_map(BTreeMap::keys).collect();
        let fields = fields.into_iter().cloned().collect();
        Some(Self::new(fields, rows))
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn sort_key<'f>(&self, field: &'f str) -> Result<(&'f str, bool), FieldError> {
        let (name, descending) = match field.strip_prefix('-') {
            Some(name) => (name, true),
            None => (field, false),
        };

        if self.fields.iter().any(|known| known == name) {
            Ok((name, descending))
        } else {
            Err(FieldError {
                field: name.to_string(),
                choices: self.fields.clone(),
            })
        }
    }
}

fn compare_field(a: &Row, b: &Row, name: &str) -> Ordering {
    match (a.get(name), b.get(name)) {
        (Some(x), Some(y)) => x.sort_cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl QuerySet for RecordSet {
    fn order_by(&self, fields: &[String]) -> Result<Arc<dyn QuerySet>, FieldError> {
        let keys = fields
            .iter()
            .map(|field| self.sort_key(field))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            keys.iter()
                .map(|&(name, descending)| {
                    let ord = compare_field(a, b, name);
                    if descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        Ok(Arc::new(Self {
            fields: self.fields.clone(),
            rows,
        }))
    }

    fn rows(&self) -> Vec<Value> {
        self.rows.iter().cloned().map(Value::Map).collect()
    }
}

impl From<RecordSet> for Value {
    fn from(records: RecordSet) -> Self {
        Value::QuerySet(Arc::new(records))
    }
}

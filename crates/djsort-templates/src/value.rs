use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::FieldError;

/// A collection that can be reordered by field names.
///
/// A field prefixed with `-` orders descending. Earlier fields take
/// precedence; later ones break ties. Reordering never mutates `self`, it
/// returns a new view.
pub trait QuerySet: fmt::Debug + Send + Sync {
    fn order_by(&self, fields: &[String]) -> Result<Arc<dyn QuerySet>, FieldError>;

    /// Materialize the rows, in the current order.
    fn rows(&self) -> Vec<Value>;
}

/// A value stored in a rendering [`Context`](crate::Context).
#[derive(Clone, Debug)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    QuerySet(Arc<dyn QuerySet>),
}

impl Value {
    /// Look up one segment of a dotted variable path.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i).cloned()),
            Value::QuerySet(qs) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| qs.rows().into_iter().nth(i)),
            _ => None,
        }
    }

    /// The items a `for` loop walks over, or `None` if the value is not iterable.
    #[must_use]
    pub fn iter_items(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items.clone()),
            Value::QuerySet(qs) => Some(qs.rows()),
            _ => None,
        }
    }

    /// Text form, as the template engine prints it (before escaping).
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.repr(),
        }
    }

    fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Value::Float(f) => f.to_string(),
            Value::String(s) => format!("'{s}'"),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("'{k}': {}", v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::QuerySet(qs) => {
                let inner: Vec<String> = qs.rows().iter().map(Value::repr).collect();
                format!("<QuerySet [{}]>", inner.join(", "))
            }
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::None => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::List(_) => 4,
            Value::Map(_) => 5,
            Value::QuerySet(_) => 6,
        }
    }

    /// Total order used when sorting rows: `None` first, then booleans,
    /// numbers, strings and containers. Values of the same kind compare
    /// naturally.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.sort_cmp(y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::QuerySet(a), Value::QuerySet(b)) => a.rows() == b.rows(),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<Arc<dyn QuerySet>> for Value {
    fn from(value: Arc<dyn QuerySet>) -> Self {
        Value::QuerySet(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

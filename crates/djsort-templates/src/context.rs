use std::collections::BTreeMap;

use crate::request::Request;
use crate::value::Value;

/// Variables visible while rendering, plus the request being answered.
///
/// Scopes form a stack; lookups search from the innermost scope outwards and
/// assignments always land in the innermost one.
#[derive(Clone, Debug)]
pub struct Context {
    scopes: Vec<BTreeMap<String, Value>>,
    request: Option<Request>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            scopes: vec![BTreeMap::new()],
            request: None,
        }
    }
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    #[must_use]
    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    pub fn set_request(&mut self, request: Request) {
        self.request = Some(request);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value.into());
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(BTreeMap::new());
    }

    /// Drop the innermost scope. The outermost scope is never removed.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }
}

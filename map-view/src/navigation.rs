//! Query-string navigation port.
//!
//! The view never talks to a router directly; it goes through this trait so
//! the host application decides where the query lives, and tests can inject
//! an in-memory implementation.

use std::collections::HashMap;

pub trait Navigator {
    /// Current query parameters.
    fn query(&self) -> HashMap<String, String>;

    /// Replaces the whole query string.
    fn replace_query(&mut self, query: HashMap<String, String>);
}

/// Merges one key into the current query, keeping every other parameter.
pub fn update_query(navigator: &mut dyn Navigator, key: &str, value: &str) {
    let mut query = navigator.query();
    query.insert(key.to_string(), value.to_string());
    navigator.replace_query(query);
}

/// Keeps the query in memory. The desktop build has no URL bar, so this is
/// the production implementation as well as the test double.
#[derive(Debug, Default)]
pub struct InMemoryNavigator {
    query: HashMap<String, String>,
}

impl InMemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the query as `key=value` pairs joined with `&`, sorted by
    /// key so the output is stable.
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        pairs.sort();
        pairs.join("&")
    }
}

impl Navigator for InMemoryNavigator {
    fn query(&self) -> HashMap<String, String> {
        self.query.clone()
    }

    fn replace_query(&mut self, query: HashMap<String, String>) {
        self.query = query;
    }
}

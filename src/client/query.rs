//! Query strings and sort orders.

use serde_json::Value;
use url::form_urlencoded;

/// Ordered list of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a pair only when a value is given
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Set a key, replacing an existing value in place
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// First value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Whether there are no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate over pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fold pending keys into this explicit query.
    ///
    /// Explicit keys win; a pending key is appended only when absent.
    pub fn merge(mut self, pending: Query) -> Self {
        for (key, value) in pending.pairs {
            if !self.contains(&key) {
                self.pairs.push((key, value));
            }
        }
        self
    }

    /// URL-encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Sort order passed through the `sort` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sort {
    /// Pre-encoded sort expression, sent verbatim
    Raw(String),
    /// Ordered `(field, direction)` pairs, sent as a JSON object
    Fields(Vec<(String, i32)>),
}

impl Sort {
    /// Sort by a single field; `1` ascending, `-1` descending
    pub fn by(field: impl Into<String>, direction: i32) -> Self {
        Sort::Fields(vec![(field.into(), direction)])
    }

    /// Add a tie-breaking field
    pub fn then(self, field: impl Into<String>, direction: i32) -> Self {
        match self {
            Sort::Fields(mut fields) => {
                fields.push((field.into(), direction));
                Sort::Fields(fields)
            }
            Sort::Raw(raw) => Sort::Raw(raw),
        }
    }

    /// Value of the `sort` query parameter.
    ///
    /// Field lists keep their insertion order, which the server uses as sort priority.
    pub fn to_query_value(&self) -> String {
        match self {
            Sort::Raw(raw) => raw.clone(),
            Sort::Fields(fields) => {
                let members: Vec<String> = fields
                    .iter()
                    .map(|(field, direction)| {
                        format!("{}:{}", Value::String(field.clone()), direction)
                    })
                    .collect();
                format!("{{{}}}", members.join(","))
            }
        }
    }
}

impl From<&str> for Sort {
    fn from(raw: &str) -> Self {
        Sort::Raw(raw.to_string())
    }
}

impl From<String> for Sort {
    fn from(raw: String) -> Self {
        Sort::Raw(raw)
    }
}

impl From<Vec<(String, i32)>> for Sort {
    fn from(fields: Vec<(String, i32)>) -> Self {
        Sort::Fields(fields)
    }
}

impl From<Vec<(&str, i32)>> for Sort {
    fn from(fields: Vec<(&str, i32)>) -> Self {
        Sort::Fields(fields.into_iter().map(|(f, d)| (f.to_string(), d)).collect())
    }
}

impl<const N: usize> From<[(&str, i32); N]> for Sort {
    fn from(fields: [(&str, i32); N]) -> Self {
        Sort::Fields(fields.into_iter().map(|(f, d)| (f.to_string(), d)).collect())
    }
}

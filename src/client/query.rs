/// Ordered query parameter list for STRING requests

/// Delimiter STRING expects between values of a multi-value parameter
pub const IDENTIFIER_DELIMITER: &str = "\r";

/// Join identifiers into a single STRING query value
pub fn join_identifiers<S: AsRef<str>>(identifiers: &[S]) -> String {
    identifiers
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(IDENTIFIER_DELIMITER)
}

/// Query parameters preserving insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter only when a value is present
    pub fn push_opt<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append a boolean flag as STRING's `0`/`1`
    pub fn push_flag(&mut self, key: &str, value: bool) -> &mut Self {
        self.push(key, u8::from(value))
    }

    /// Append a `\r`-joined list, skipping empty lists
    pub fn push_list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        if !values.is_empty() {
            self.push(key, join_identifiers(values));
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append `key=value` unless the key is already present
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> &mut Self {
        if !self.contains(key) {
            self.push(key, value);
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

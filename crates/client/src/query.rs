//! Query-string parameters for list endpoints.

use url::form_urlencoded;

use eventhub_core::PageRequest;

/// Ordered query parameters. Keys whose value is `None` are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, Option<String>)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a present value.
    pub fn with(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.opt(key, Some(value))
    }

    /// Append an optional value; `None` is recorded but skipped on output.
    pub fn opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.pairs.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    pub fn page(self, page: PageRequest) -> Self {
        self.opt("page", page.page).opt("limit", page.limit)
    }

    pub fn active(self, active: Option<bool>) -> Self {
        self.opt("active", active)
    }

    pub fn status(self, status: Option<impl ToString>) -> Self {
        self.opt("status", status)
    }

    pub fn search(self, search: Option<impl ToString>) -> Self {
        self.opt("search", search.map(|s| s.to_string()).filter(|s| !s.trim().is_empty()))
    }

    /// `true` when no parameter would be serialized.
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, value)| value.is_none())
    }

    /// `a=1&b=2`, or `None` when empty.
    pub fn to_query_string(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        Some(serializer.finish())
    }
}

impl From<PageRequest> for Query {
    fn from(page: PageRequest) -> Self {
        Query::new().page(page)
    }
}

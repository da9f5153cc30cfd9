//! PostgREST select query construction.
//!
//! Filters are emitted in insertion order, followed by `limit` and `order`.
//! Values are form-encoded, so plain identifiers pass through unchanged.

use url::form_urlencoded;

/// Builder for a PostgREST read query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    filters: Vec<(String, String)>,
    limit: Option<i64>,
    order: Option<String>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            limit: None,
            order: None,
        }
    }

    /// Add an exact-match filter (`column=eq.value`).
    pub fn eq(mut self, column: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.into(), format!("eq.{}", value.as_ref())));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order results descending by `column`.
    pub fn order_desc(mut self, column: impl AsRef<str>) -> Self {
        self.order = Some(format!("{}.desc", column.as_ref()));
        self
    }

    /// Render the query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (column, condition) in &self.filters {
            serializer.append_pair(column, condition);
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        if let Some(order) = &self.order {
            serializer.append_pair("order", order);
        }
        serializer.finish()
    }
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_then_limit_then_order() {
        let query = SelectQuery::new()
            .eq("user_id", "u1")
            .eq("context_type", "note")
            .limit(5)
            .order_desc("created_at");

        assert_eq!(
            query.to_query_string(),
            "user_id=eq.u1&context_type=eq.note&limit=5&order=created_at.desc"
        );
    }

    #[test]
    fn test_no_filters() {
        let query = SelectQuery::new().limit(10).order_desc("created_at");
        assert_eq!(query.to_query_string(), "limit=10&order=created_at.desc");
    }

    #[test]
    fn test_values_are_encoded() {
        let query = SelectQuery::new().eq("user_id", "a&b=c d").limit(1);
        assert_eq!(query.to_query_string(), "user_id=eq.a%26b%3Dc+d&limit=1");
    }
}

//! Ordered `WHERE` predicate builder.
//!
//! Predicates are appended in call order and rendered joined by `AND`.
//! Optional filters are only appended when their value is present, so the
//! rendered SQL and the bind list always line up.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BindValue {
    Text(String),
    Int(i32),
    Bool(bool),
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for BindValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for BindValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Builder for a conjunction of predicates.
#[derive(Debug, Clone, Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

impl Conditions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `column = ?`
    #[must_use]
    pub(crate) fn eq(mut self, column: &str, value: impl Into<BindValue>) -> Self {
        self.clauses.push(format!("{column} = ?"));
        self.binds.push(value.into());
        self
    }

    /// `column != ?`
    #[must_use]
    pub(crate) fn ne(mut self, column: &str, value: impl Into<BindValue>) -> Self {
        self.clauses.push(format!("{column} != ?"));
        self.binds.push(value.into());
        self
    }

    /// `column != ?`, only when `value` is present and not blank.
    #[must_use]
    pub(crate) fn ne_if_present(self, column: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => self.ne(column, v),
            _ => self,
        }
    }

    /// `column IN (?, ...)`. An empty list renders a predicate that
    /// matches nothing.
    ///
    /// One placeholder is bound per value, so the list counts against the
    /// statement's variable limit.
    #[must_use]
    pub(crate) fn in_list<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.binds.len();
        self.binds.extend(
            values
                .into_iter()
                .map(|v| BindValue::Text(v.as_ref().to_string())),
        );
        let count = self.binds.len() - before;

        if count == 0 {
            self.clauses.push("1 = 0".to_string());
        } else {
            let placeholders = vec!["?"; count].join(", ");
            self.clauses.push(format!("{column} IN ({placeholders})"));
        }
        self
    }

    /// Render as ` WHERE ...`, or an empty string when there are no predicates.
    pub(crate) fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Bind every value in predicate order.
    pub(crate) fn bind_to<'q>(
        &'q self,
        mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        for value in &self.binds {
            query = match value {
                BindValue::Text(s) => query.bind(s.as_str()),
                BindValue::Int(i) => query.bind(*i),
                BindValue::Bool(b) => query.bind(*b),
            };
        }
        query
    }

    #[cfg(test)]
    pub(crate) fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}

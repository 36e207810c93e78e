//! Internal representation of query clauses.
//!
//! These types are used by the builders and are not part of the public API.

/// An ORDER BY clause.
pub(crate) struct OrderClause {
    pub column: String,
    pub desc: bool,
}

/// Appends ` WHERE <predicate>` when a predicate exists.
pub(crate) fn push_where(sql: &mut String, predicate: Option<&str>) {
    if let Some(predicate) = predicate {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }
}

// src/infrastructure/repositories/natural_search.rs
use crate::domain::event::{SearchColumn, filter::search_terms};
use sqlx::{Postgres, QueryBuilder};

/// Appends ` AND (col ILIKE $n AND col ILIKE $m ...)`, one bound pattern per
/// whitespace-separated term. The column comes from `SearchColumn`, never
/// from the request. A value without terms adds nothing.
pub(super) fn push_natural_search(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: SearchColumn,
    value: &str,
) {
    let patterns: Vec<String> = search_terms(value).map(like_pattern).collect();
    if patterns.is_empty() {
        return;
    }

    builder.push(" AND (");
    for (index, pattern) in patterns.into_iter().enumerate() {
        if index > 0 {
            builder.push(" AND ");
        }
        builder.push(column.column());
        builder.push(" ILIKE ");
        builder.push_bind(pattern);
    }
    builder.push(")");
}

/// `%term%` with LIKE metacharacters escaped using the default `\` escape.
pub(super) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

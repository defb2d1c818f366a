// src/domain/event/filter.rs
use chrono::{DateTime, Utc};

/// Sortable columns. Request parameters are matched against this list only;
/// the SQL column names never come from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    RowId,
    Date,
    Code,
    Ip,
    UserLogin,
    Description,
    UserAgent,
    PrefixSession,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::RowId,
        SortField::Date,
        SortField::Code,
        SortField::Ip,
        SortField::UserLogin,
        SortField::Description,
        SortField::UserAgent,
        SortField::PrefixSession,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|field| field.as_param() == raw)
    }

    /// Value used in `sortfield` links. It is also the `ORDER BY` column, so
    /// only these whitelisted strings ever reach the SQL text.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortField::RowId => "e.rowid",
            SortField::Date => "e.dateevent",
            SortField::Code => "e.type",
            SortField::Ip => "e.ip",
            SortField::UserLogin => "u.login",
            SortField::Description => "e.description",
            SortField::UserAgent => "e.user_agent",
            SortField::PrefixSession => "e.prefix_session",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Columns that accept natural-search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchColumn {
    Code,
    Ip,
    UserLogin,
    Description,
    UserAgent,
    PrefixSession,
}

impl SearchColumn {
    pub fn column(&self) -> &'static str {
        match self {
            SearchColumn::Code => "e.type",
            SearchColumn::Ip => "e.ip",
            SearchColumn::UserLogin => "u.login",
            SearchColumn::Description => "e.description",
            SearchColumn::UserAgent => "e.user_agent",
            SearchColumn::PrefixSession => "e.prefix_session",
        }
    }
}

/// Splits a natural-search value into the terms that must all match.
pub fn search_terms(value: &str) -> impl Iterator<Item = &str> {
    value.split_whitespace()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub rowid: Option<i64>,
    pub code: Option<String>,
    pub ip: Option<String>,
    pub user: Option<String>,
    pub description: Option<String>,
    pub user_agent: Option<String>,
    pub prefix_session: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
}

impl EventFilter {
    /// Text searches in a fixed column order, skipping unset ones.
    pub fn text_searches(&self) -> Vec<(SearchColumn, &str)> {
        [
            (SearchColumn::Code, self.code.as_deref()),
            (SearchColumn::Ip, self.ip.as_deref()),
            (SearchColumn::UserLogin, self.user.as_deref()),
            (SearchColumn::Description, self.description.as_deref()),
            (SearchColumn::UserAgent, self.user_agent.as_deref()),
            (SearchColumn::PrefixSession, self.prefix_session.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }

    /// Number of search criteria in use. Date bounds are not counted: they are
    /// set by default on a first visit.
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.rowid.is_some()) + self.text_searches().len()
    }

    pub fn is_active(&self) -> bool {
        self.active_filter_count() > 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.limit)
    }

    /// One more than the page size, so a following page can be detected
    /// without counting.
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.limit) + 1
    }
}

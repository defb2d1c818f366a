// src/presentation/http/views.rs
use crate::application::{
    dto::{AdminBadge, EventListPage, EventRowDto},
    ports::localization::Translator,
    queries::events::{EventListRequest, ListingSettings},
};
use crate::domain::event::{EventFilter, SortField, SortOrder};
use askama::Template;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

pub const EVENTS_PATH: &str = "/admin/tools/events";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct HeaderCell {
    pub label: String,
    pub url: String,
    pub indicator: &'static str,
    pub active: bool,
}

pub struct SelectOption {
    pub value: u32,
    pub selected: bool,
}

pub struct DateInput {
    pub prefix: &'static str,
    pub label: String,
    pub days: Vec<SelectOption>,
    pub months: Vec<SelectOption>,
    pub year: String,
}

pub struct FilterInputs {
    pub rowid: String,
    pub code: String,
    pub ip: String,
    pub user: String,
    pub description: String,
    pub user_agent: String,
    pub prefix_session: String,
    /// Start then end.
    pub dates: Vec<DateInput>,
}

pub struct RowView {
    pub id: i64,
    pub date: String,
    pub code: String,
    pub ip: String,
    pub user_login: Option<String>,
    pub user_title: String,
    pub user_active: bool,
    pub badge_class: &'static str,
    pub badge_title: String,
    pub description: String,
    pub user_agent: String,
    pub prefix_session: String,
    pub tooltip: String,
}

pub struct ConfirmDialog {
    pub title: String,
    pub question: String,
    pub token: String,
}

pub struct Labels {
    pub search: String,
    pub remove_filter: String,
    pub purge: String,
    pub previous: String,
    pub next: String,
    pub yes: String,
    pub no: String,
    pub day: String,
    pub month: String,
    pub year: String,
}

#[derive(Template)]
#[template(path = "events/list.html")]
pub struct EventListTemplate {
    pub title: String,
    pub page_label: String,
    pub action_path: &'static str,
    pub labels: Labels,
    pub headers: Vec<HeaderCell>,
    pub filters: FilterInputs,
    pub hidden: Vec<(&'static str, String)>,
    pub rows: Vec<RowView>,
    pub empty_message: Option<String>,
    pub column_count: usize,
    pub show_prefix_session: bool,
    pub purge_url: Option<String>,
    pub confirm: Option<ConfirmDialog>,
    pub flash_error: Option<String>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

/// Everything besides the listing itself that shapes the rendered page.
#[derive(Default)]
pub struct PageContext {
    pub can_purge: bool,
    pub confirm_token: Option<String>,
    pub flash_error: Option<String>,
}

pub fn render_listing(
    page: &EventListPage,
    request: &EventListRequest,
    settings: &ListingSettings,
    translator: &dyn Translator,
    context: PageContext,
) -> Result<String, askama::Error> {
    build_listing(page, request, settings, translator, context).render()
}

pub fn build_listing(
    page: &EventListPage,
    request: &EventListRequest,
    settings: &ListingSettings,
    translator: &dyn Translator,
    context: PageContext,
) -> EventListTemplate {
    let links = LinkBuilder::new(request, settings);
    let tz = settings.timezone;

    let headers = columns(settings)
        .into_iter()
        .map(|(key, field)| header_cell(key, field, request, &links, translator))
        .collect();

    let rows: Vec<RowView> = page
        .rows
        .iter()
        .map(|row| row_view(row, tz, settings.show_prefix_session, translator))
        .collect();

    let empty_message = rows.is_empty().then(|| {
        if page.filters_active {
            translator.text("NoEventFoundWithCriteria")
        } else {
            translator.text("NoEventOrNoAuditSetup")
        }
    });

    let purge_url = (context.can_purge && !rows.is_empty())
        .then(|| links.url(&[("action", "purge".to_string())]));

    let confirm = context.confirm_token.map(|token| ConfirmDialog {
        title: translator.text("PurgeAuditEvents"),
        question: translator.text("ConfirmPurgeAuditEvents"),
        token,
    });

    let prev_url = (page.page > 0).then(|| links.page_url(page.page - 1));
    let next_url = page.has_more.then(|| links.page_url(page.page + 1));

    let hidden = vec![
        ("sortfield", request.sort.field.as_param().to_string()),
        ("sortorder", request.sort.order.as_param().to_string()),
        ("limit", page.limit.to_string()),
        ("pageplusoneold", (page.page + 1).to_string()),
    ];

    let page_number = (page.page + 1).to_string();

    EventListTemplate {
        title: translator.text("ListOfSecurityEvents"),
        page_label: translator.trans("Page", &[page_number.as_str()]),
        action_path: EVENTS_PATH,
        labels: Labels {
            search: translator.text("Search"),
            remove_filter: translator.text("RemoveFilter"),
            purge: translator.text("Purge"),
            previous: translator.text("Previous"),
            next: translator.text("Next"),
            yes: translator.text("Yes"),
            no: translator.text("No"),
            day: translator.text("Day"),
            month: translator.text("Month"),
            year: translator.text("Year"),
        },
        headers,
        filters: filter_inputs(&request.filter, tz, translator),
        hidden,
        rows,
        empty_message,
        column_count: if settings.show_prefix_session { 9 } else { 8 },
        show_prefix_session: settings.show_prefix_session,
        purge_url,
        confirm,
        flash_error: context.flash_error,
        prev_url,
        next_url,
    }
}

fn columns(settings: &ListingSettings) -> Vec<(&'static str, SortField)> {
    let mut columns = vec![
        ("ID", SortField::RowId),
        ("Date", SortField::Date),
        ("Code", SortField::Code),
        ("IP", SortField::Ip),
        ("User", SortField::UserLogin),
        ("Description", SortField::Description),
        ("UserAgent", SortField::UserAgent),
    ];
    if settings.show_prefix_session {
        columns.push(("SuffixSessionName", SortField::PrefixSession));
    }
    columns
}

fn header_cell(
    key: &str,
    field: SortField,
    request: &EventListRequest,
    links: &LinkBuilder,
    translator: &dyn Translator,
) -> HeaderCell {
    let active = request.sort.field == field;
    let (order, indicator) = match (active, request.sort.order) {
        (true, SortOrder::Asc) => (SortOrder::Desc, "\u{25b2}"),
        (true, SortOrder::Desc) => (SortOrder::Asc, "\u{25bc}"),
        (false, _) => (SortOrder::Asc, ""),
    };
    HeaderCell {
        label: translator.text(key),
        url: links.sort_url(field, order),
        indicator,
        active,
    }
}

fn row_view(
    row: &EventRowDto,
    tz: Tz,
    show_prefix_session: bool,
    translator: &dyn Translator,
) -> RowView {
    let unknown = || translator.text("Unknown");
    let user_agent = row.user_agent.clone().unwrap_or_default();
    let prefix_session = row.prefix_session.clone().unwrap_or_default();

    let mut tooltip = format!(
        "{}: {}",
        translator.text("UserAgent"),
        row.user_agent.clone().unwrap_or_else(unknown)
    );
    if show_prefix_session {
        tooltip.push_str(&format!(
            " / {}: {}",
            translator.text("SuffixSessionName"),
            row.prefix_session.clone().unwrap_or_else(unknown)
        ));
    }

    let (badge_class, badge_title) = match row.user.as_ref().and_then(|u| u.badge) {
        Some(AdminBadge::SuperAdministrator) => {
            ("badge-superadmin", translator.text("SuperAdministratorDesc"))
        }
        Some(AdminBadge::Administrator) => ("badge-admin", translator.text("AdministratorDesc")),
        None => ("", String::new()),
    };

    RowView {
        id: row.id,
        date: format_local(row.occurred_at, tz),
        code: row.event_type.clone(),
        ip: row.ip.clone(),
        user_login: row.user.as_ref().map(|u| u.login.clone()),
        user_title: row
            .user
            .as_ref()
            .and_then(|u| u.full_name.clone())
            .unwrap_or_default(),
        user_active: row.user.as_ref().is_none_or(|u| u.active),
        badge_class,
        badge_title,
        description: row.description.clone(),
        user_agent,
        prefix_session,
        tooltip,
    }
}

pub fn format_local(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format(DATE_FORMAT).to_string()
}

fn filter_inputs(filter: &EventFilter, tz: Tz, translator: &dyn Translator) -> FilterInputs {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    FilterInputs {
        rowid: filter.rowid.map(|id| id.to_string()).unwrap_or_default(),
        code: text(&filter.code),
        ip: text(&filter.ip),
        user: text(&filter.user),
        description: text(&filter.description),
        user_agent: text(&filter.user_agent),
        prefix_session: text(&filter.prefix_session),
        dates: vec![
            date_input("date_start", translator.text("DateStart"), filter.date_start, tz),
            date_input("date_end", translator.text("DateEnd"), filter.date_end, tz),
        ],
    }
}

fn date_input(
    prefix: &'static str,
    label: String,
    value: Option<DateTime<Utc>>,
    tz: Tz,
) -> DateInput {
    let local = value.map(|at| at.with_timezone(&tz).date_naive());
    let options = |range: std::ops::RangeInclusive<u32>, current: Option<u32>| {
        range
            .map(|value| SelectOption {
                value,
                selected: current == Some(value),
            })
            .collect()
    };
    DateInput {
        prefix,
        label,
        days: options(1..=31, local.map(|d| d.day())),
        months: options(1..=12, local.map(|d| d.month())),
        year: local.map(|d| d.year().to_string()).unwrap_or_default(),
    }
}

/// Builds links that carry the active filters, so that paging and sorting
/// keep the current search.
struct LinkBuilder {
    filter_params: Vec<(&'static str, String)>,
    sort: (SortField, SortOrder),
    limit: Option<u32>,
}

impl LinkBuilder {
    fn new(request: &EventListRequest, settings: &ListingSettings) -> Self {
        let filter = &request.filter;
        let tz = settings.timezone;
        let mut params: Vec<(&'static str, String)> = Vec::new();

        if let Some(rowid) = filter.rowid {
            params.push(("search_rowid", rowid.to_string()));
        }
        let texts = [
            ("search_code", &filter.code),
            ("search_ip", &filter.ip),
            ("search_user", &filter.user),
            ("search_desc", &filter.description),
            ("search_ua", &filter.user_agent),
            ("search_prefix_session", &filter.prefix_session),
        ];
        for (name, value) in texts {
            if let Some(value) = value {
                params.push((name, value.clone()));
            }
        }
        push_date(&mut params, ["date_startday", "date_startmonth", "date_startyear"], filter.date_start, tz);
        push_date(&mut params, ["date_endday", "date_endmonth", "date_endyear"], filter.date_end, tz);

        Self {
            filter_params: params,
            sort: (request.sort.field, request.sort.order),
            limit: (request.page.limit != settings.default_limit).then_some(request.page.limit),
        }
    }

    fn base(&self) -> Vec<(&'static str, String)> {
        let mut params = self.filter_params.clone();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    fn url(&self, extra: &[(&'static str, String)]) -> String {
        let mut params = self.base();
        params.push(("sortfield", self.sort.0.as_param().to_string()));
        params.push(("sortorder", self.sort.1.as_param().to_string()));
        params.extend(extra.iter().cloned());
        encode(&params)
    }

    fn page_url(&self, page: u32) -> String {
        self.url(&[("page", page.to_string())])
    }

    fn sort_url(&self, field: SortField, order: SortOrder) -> String {
        let mut params = self.base();
        params.push(("sortfield", field.as_param().to_string()));
        params.push(("sortorder", order.as_param().to_string()));
        params.push(("page", "0".to_string()));
        encode(&params)
    }
}

fn push_date(
    params: &mut Vec<(&'static str, String)>,
    [day, month, year]: [&'static str; 3],
    value: Option<DateTime<Utc>>,
    tz: Tz,
) {
    if let Some(at) = value {
        let local = at.with_timezone(&tz);
        params.push((day, local.day().to_string()));
        params.push((month, local.month().to_string()));
        params.push((year, local.year().to_string()));
    }
}

fn encode(params: &[(&'static str, String)]) -> String {
    match serde_urlencoded::to_string(params) {
        Ok(query) if !query.is_empty() => format!("{EVENTS_PATH}?{query}"),
        _ => EVENTS_PATH.to_string(),
    }
}

// src/application/queries/events/filters.rs
use crate::application::dto::RawEventListParams;
use crate::domain::event::{EventFilter, PageRequest, Sort, SortField, SortOrder};
use crate::domain::scope::EntityId;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_LIMIT: u32 = 25;
pub const MAX_LIMIT: u32 = 500;

/// Page-wide settings that shape parsing and display of the listing.
#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub default_limit: u32,
    /// Business timezone; date inputs and displayed timestamps are
    /// interpreted in it, daylight saving included.
    pub timezone: Tz,
    pub show_prefix_session: bool,
    pub multicompany: bool,
    pub shared_entities: Vec<EntityId>,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            timezone: Tz::UTC,
            show_prefix_session: false,
            multicompany: false,
            shared_entities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListRequest {
    pub filter: EventFilter,
    pub sort: Sort,
    pub page: PageRequest,
}

pub fn parse_list_request(
    raw: &RawEventListParams,
    now: DateTime<Utc>,
    settings: &ListingSettings,
) -> EventListRequest {
    let limit = parse_int(raw.limit.as_deref())
        .filter(|limit| *limit > 0)
        .map(|limit| u32::try_from(limit).unwrap_or(MAX_LIMIT).min(MAX_LIMIT))
        .unwrap_or(settings.default_limit);

    let page_number = match raw.pageplusone.as_deref() {
        Some(value) => parse_int(Some(value)).and_then(|p| p.checked_sub(1)),
        None => parse_int(raw.page.as_deref()),
    };
    let page_number = page_number
        .filter(|p| *p > 0)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(0);

    let sort = Sort {
        field: raw
            .sortfield
            .as_deref()
            .and_then(SortField::parse)
            .unwrap_or_default(),
        order: raw
            .sortorder
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default(),
    };

    let tz = settings.timezone;
    let mut date_start = local_date(&raw.date_startyear, &raw.date_startmonth, &raw.date_startday)
        .and_then(|date| day_start(tz, date));
    let mut date_end = local_date(&raw.date_endyear, &raw.date_endmonth, &raw.date_endday)
        .and_then(|date| day_end(tz, date));

    // past the last representable instant the range is simply open-ended
    if let (Some(start), Some(end)) = (date_start, date_end) {
        if start > end {
            date_end = start.checked_add_signed(Duration::hours(24));
        }
    }

    // Only a first visit gets the current month; paging keeps whatever range
    // the links carry.
    if raw.page.is_none() && raw.pageplusoneold.is_none() {
        let (first, last) = month_bounds(now, tz);
        date_start = date_start.or(first);
        date_end = date_end.or(last);
    }

    let mut filter = EventFilter {
        rowid: parse_int(raw.search_rowid.as_deref()).filter(|id| *id > 0),
        code: clean(&raw.search_code),
        ip: clean(&raw.search_ip),
        user: clean(&raw.search_user),
        description: clean(&raw.search_desc),
        user_agent: clean(&raw.search_ua),
        prefix_session: clean(&raw.search_prefix_session),
        date_start,
        date_end,
    };

    if raw.remove_filter_requested() {
        filter.clear();
    }

    EventListRequest {
        filter,
        sort,
        page: PageRequest::new(page_number, limit),
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}

fn clean(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Builds a date from day/month/year inputs. A month of zero or less
/// means "not set"; impossible dates are treated the same way.
fn local_date(
    year: &Option<String>,
    month: &Option<String>,
    day: &Option<String>,
) -> Option<NaiveDate> {
    let month = parse_int(month.as_deref()).filter(|m| *m > 0)?;
    let day = parse_int(day.as_deref()).filter(|d| *d > 0)?;
    let year = parse_int(year.as_deref()).filter(|y| *y > 0)?;

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// First instant of `date` in `tz`. A midnight skipped by a DST jump
/// resolves to the first hour that exists.
fn day_start(tz: Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| shifted(tz, midnight, Duration::hours(1)).and_then(|r| r.earliest()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Last second of `date` in `tz`; a repeated hour resolves to its later pass.
fn day_end(tz: Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    let last = date.and_hms_opt(23, 59, 59)?;
    tz.from_local_datetime(&last)
        .latest()
        .or_else(|| shifted(tz, last, Duration::hours(-1)).and_then(|r| r.latest()))
        .map(|dt| dt.with_timezone(&Utc))
}

fn shifted(
    tz: Tz,
    local: NaiveDateTime,
    by: Duration,
) -> Option<chrono::LocalResult<DateTime<Tz>>> {
    local
        .checked_add_signed(by)
        .map(|moved| tz.from_local_datetime(&moved))
}

/// First and last second of the month containing `now`, in `tz`.
pub fn month_bounds(now: DateTime<Utc>, tz: Tz) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let today = now.with_timezone(&tz).date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1);
    let next_first = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_first.and_then(|d| d.pred_opt());

    (
        first.and_then(|d| day_start(tz, d)),
        last.and_then(|d| day_end(tz, d)),
    )
}

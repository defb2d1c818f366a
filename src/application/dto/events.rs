use crate::application::ports::localization::Translator;
use crate::domain::event::{DecodedDescription, DescriptionDecoder, Event, EventUser};
use crate::domain::user::UserStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing parameters exactly as received. Everything stays a string so that
/// malformed values fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEventListParams {
    pub action: Option<String>,
    pub confirm: Option<String>,
    pub token: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
    pub pageplusone: Option<String>,
    pub pageplusoneold: Option<String>,
    pub sortfield: Option<String>,
    pub sortorder: Option<String>,
    pub search_rowid: Option<String>,
    pub search_code: Option<String>,
    pub search_ip: Option<String>,
    pub search_user: Option<String>,
    pub search_desc: Option<String>,
    pub search_ua: Option<String>,
    pub search_prefix_session: Option<String>,
    pub date_startday: Option<String>,
    pub date_startmonth: Option<String>,
    pub date_startyear: Option<String>,
    pub date_endday: Option<String>,
    pub date_endmonth: Option<String>,
    pub date_endyear: Option<String>,
    pub button_removefilter: Option<String>,
    pub button_removefilter_x: Option<String>,
    #[serde(rename = "button_removefilter.x")]
    pub button_removefilter_dot_x: Option<String>,
}

impl RawEventListParams {
    /// Browsers submit image buttons under different names.
    pub fn remove_filter_requested(&self) -> bool {
        [
            &self.button_removefilter,
            &self.button_removefilter_x,
            &self.button_removefilter_dot_x,
        ]
        .into_iter()
        .any(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBadge {
    SuperAdministrator,
    Administrator,
}

#[derive(Debug, Clone)]
pub struct EventUserDto {
    pub id: i64,
    pub login: String,
    pub full_name: Option<String>,
    pub active: bool,
    pub badge: Option<AdminBadge>,
}

impl EventUserDto {
    fn from_user(user: EventUser, multicompany: bool) -> Self {
        let badge = if multicompany && user.is_super_admin() {
            Some(AdminBadge::SuperAdministrator)
        } else if user.admin {
            Some(AdminBadge::Administrator)
        } else {
            None
        };
        Self {
            id: user.id.into(),
            full_name: user.full_name(),
            active: user.status == UserStatus::Active,
            login: user.login,
            badge,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventRowDto {
    pub id: i64,
    pub occurred_at: DateTime<Utc>,
    pub event_type: String,
    pub ip: String,
    pub user: Option<EventUserDto>,
    /// Decoded and translated description.
    pub description: String,
    pub user_agent: Option<String>,
    pub prefix_session: Option<String>,
}

impl EventRowDto {
    pub fn from_event(
        event: Event,
        decoder: &DescriptionDecoder,
        translator: &dyn Translator,
        multicompany: bool,
    ) -> Self {
        let description = render_description(&decoder.decode(&event.description), translator);
        Self {
            id: event.id.into(),
            occurred_at: event.occurred_at,
            event_type: event.event_type,
            ip: event.ip,
            user: event
                .user
                .map(|user| EventUserDto::from_user(user, multicompany)),
            description,
            user_agent: event.user_agent.filter(|ua| !ua.is_empty()),
            prefix_session: event.prefix_session.filter(|p| !p.is_empty()),
        }
    }
}

pub fn render_description(decoded: &DecodedDescription, translator: &dyn Translator) -> String {
    let args: Vec<&str> = decoded.args.iter().map(String::as_str).collect();
    let mut text = translator.trans(&decoded.key, &args);
    if let Some(trailing) = &decoded.trailing {
        text.push_str(trailing);
    }
    text
}

#[derive(Debug, Clone)]
pub struct EventListPage {
    pub rows: Vec<EventRowDto>,
    pub has_more: bool,
    pub page: u32,
    pub limit: u32,
    pub filters_active: bool,
}

impl EventListPage {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

mod common;
pub mod filters;
mod list;
mod service;

pub(crate) use common::ensure_admin;
pub use filters::{EventListRequest, ListingSettings, parse_list_request};
pub use service::EventQueryService;

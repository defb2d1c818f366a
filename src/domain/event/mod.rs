// src/domain/event/mod.rs
pub mod description;
pub mod entity;
pub mod filter;
pub mod repository;

pub use description::{DecodedDescription, DescriptionDecoder};
pub use entity::{Event, EventId, EventUser, NewEvent, PURGE_EVENT_TYPE};
pub use filter::{EventFilter, PageRequest, SearchColumn, Sort, SortField, SortOrder};
pub use repository::{EventRepository, EventSlice, PurgeOutcome};

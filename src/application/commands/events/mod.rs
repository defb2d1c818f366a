mod purge;
mod service;

pub use purge::{ConfirmPurgeCommand, PageAction, PurgeStep};
pub use service::EventCommandService;

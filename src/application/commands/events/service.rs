use std::sync::Arc;

use crate::application::ports::{forgery::AntiForgery, localization::Translator, time::Clock};
use crate::domain::event::EventRepository;

pub struct EventCommandService {
    pub(super) repo: Arc<dyn EventRepository>,
    pub(super) translator: Arc<dyn Translator>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) anti_forgery: Arc<dyn AntiForgery>,
}

impl EventCommandService {
    pub fn new(
        repo: Arc<dyn EventRepository>,
        translator: Arc<dyn Translator>,
        clock: Arc<dyn Clock>,
        anti_forgery: Arc<dyn AntiForgery>,
    ) -> Self {
        Self {
            repo,
            translator,
            clock,
            anti_forgery,
        }
    }
}

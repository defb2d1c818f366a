use std::sync::Arc;

use super::filters::ListingSettings;
use crate::application::ports::{localization::Translator, time::Clock};
use crate::domain::event::{DescriptionDecoder, EventRepository};

pub struct EventQueryService {
    pub(super) repo: Arc<dyn EventRepository>,
    pub(super) translator: Arc<dyn Translator>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) decoder: DescriptionDecoder,
    pub(super) settings: ListingSettings,
}

impl EventQueryService {
    pub fn new(
        repo: Arc<dyn EventRepository>,
        translator: Arc<dyn Translator>,
        clock: Arc<dyn Clock>,
        settings: ListingSettings,
    ) -> Self {
        Self {
            repo,
            translator,
            clock,
            decoder: DescriptionDecoder::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &ListingSettings {
        &self.settings
    }
}

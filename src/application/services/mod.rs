// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::events::EventCommandService,
        ports::{
            forgery::AntiForgery, localization::Translator, security::TokenManager, time::Clock,
        },
        queries::events::{EventQueryService, ListingSettings},
    },
    domain::event::EventRepository,
};

pub struct ApplicationServices {
    pub event_queries: Arc<EventQueryService>,
    pub event_commands: Arc<EventCommandService>,
    token_manager: Arc<dyn TokenManager>,
    translator: Arc<dyn Translator>,
}

impl ApplicationServices {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        token_manager: Arc<dyn TokenManager>,
        anti_forgery: Arc<dyn AntiForgery>,
        translator: Arc<dyn Translator>,
        clock: Arc<dyn Clock>,
        settings: ListingSettings,
    ) -> Self {
        let event_queries = Arc::new(EventQueryService::new(
            Arc::clone(&event_repo),
            Arc::clone(&translator),
            Arc::clone(&clock),
            settings,
        ));

        let event_commands = Arc::new(EventCommandService::new(
            Arc::clone(&event_repo),
            Arc::clone(&translator),
            Arc::clone(&clock),
            Arc::clone(&anti_forgery),
        ));

        Self {
            event_queries,
            event_commands,
            token_manager,
            translator,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn translator(&self) -> Arc<dyn Translator> {
        Arc::clone(&self.translator)
    }
}

use super::{EventQueryService, common, filters};
use crate::{
    application::{
        dto::{AuthenticatedUser, EventListPage, EventRowDto, RawEventListParams},
        error::ApplicationResult,
    },
    domain::scope::EntityScope,
};

impl EventQueryService {
    /// Interpret raw request parameters against the current time.
    pub fn parse_request(&self, raw: &RawEventListParams) -> filters::EventListRequest {
        filters::parse_list_request(raw, self.clock.now(), &self.settings)
    }

    pub fn scope_for(&self, actor: &AuthenticatedUser) -> EntityScope {
        EntityScope::new(actor.entity, self.settings.shared_entities.iter().copied())
    }

    pub async fn list_events(
        &self,
        actor: &AuthenticatedUser,
        request: &filters::EventListRequest,
    ) -> ApplicationResult<EventListPage> {
        common::ensure_admin(actor)?;

        let scope = self.scope_for(actor);
        let slice = self
            .repo
            .list(&scope, &request.filter, request.sort, request.page)
            .await?;

        tracing::debug!(
            entity = %scope.current(),
            page = request.page.page,
            rows = slice.events.len(),
            has_more = slice.has_more,
            "listed security events"
        );

        let rows = slice
            .events
            .into_iter()
            .map(|event| {
                EventRowDto::from_event(
                    event,
                    &self.decoder,
                    self.translator.as_ref(),
                    self.settings.multicompany,
                )
            })
            .collect();

        Ok(EventListPage {
            rows,
            has_more: slice.has_more,
            page: request.page.page,
            limit: request.page.limit,
            filters_active: request.filter.is_active(),
        })
    }
}

use super::EventCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RawEventListParams},
        error::{ApplicationError, ApplicationResult},
        queries::events::ensure_admin,
    },
    domain::event::NewEvent,
};

/// Translation key of the description stored on the purge record.
pub const PURGED_TEXT_KEY: &str = "SecurityEventsPurged";

/// What a request asks the page to do besides listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    List,
    RequestPurge,
    ConfirmPurge { token: String },
}

impl PageAction {
    /// Users bound to a third party never trigger actions; a confirmation
    /// without `confirm=yes` is ignored.
    pub fn from_params(raw: &RawEventListParams, actor: &AuthenticatedUser) -> Self {
        if actor.is_external() {
            return PageAction::List;
        }
        match raw.action.as_deref().map(str::trim) {
            Some("purge") => PageAction::RequestPurge,
            Some("confirm_purge") if raw.confirm.as_deref() == Some("yes") => {
                PageAction::ConfirmPurge {
                    token: raw.token.clone().unwrap_or_default(),
                }
            }
            _ => PageAction::List,
        }
    }
}

/// Purge workflow: `Requested` renders a confirmation carrying a fresh token;
/// a confirmed command bearing that token moves to `Executed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeStep {
    Requested { token: String },
    Executed { deleted: u64, record_id: i64 },
}

#[derive(Debug, Clone)]
pub struct ConfirmPurgeCommand {
    pub token: String,
    pub ip: String,
    pub user_agent: Option<String>,
}

impl EventCommandService {
    pub fn request_purge(&self, actor: &AuthenticatedUser) -> ApplicationResult<PurgeStep> {
        ensure_admin(actor)?;
        let token = self.anti_forgery.issue(actor)?;
        Ok(PurgeStep::Requested { token })
    }

    pub async fn confirm_purge(
        &self,
        actor: &AuthenticatedUser,
        command: ConfirmPurgeCommand,
    ) -> ApplicationResult<PurgeStep> {
        ensure_admin(actor)?;
        if actor.is_external() {
            return Err(ApplicationError::forbidden("external users cannot purge events"));
        }
        self.anti_forgery.verify(actor, &command.token)?;

        let text = self.translator.text(PURGED_TEXT_KEY);
        let record = NewEvent::purge_record(
            actor.entity,
            actor.id,
            text.clone(),
            command.ip,
            command.user_agent,
            self.clock.now(),
        );

        let outcome = self
            .repo
            .purge(actor.entity, record)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, entity = %actor.entity, user = %actor.login, "security event purge failed");
                ApplicationError::from(err)
            })?;

        tracing::warn!(
            entity = %actor.entity,
            user = %actor.login,
            deleted = outcome.deleted,
            "{text}"
        );

        Ok(PurgeStep::Executed {
            deleted: outcome.deleted,
            record_id: outcome.record_id.into(),
        })
    }
}

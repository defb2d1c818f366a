// src/presentation/http/controllers/events.rs
use crate::application::{
    commands::events::{ConfirmPurgeCommand, PageAction, PurgeStep},
    dto::{AuthenticatedUser, RawEventListParams},
};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::{Authenticated, ClientInfo},
    state::HttpState,
    views::{self, EVENTS_PATH, PageContext},
};
use axum::{
    Extension, Form,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

/// Listing page. `action=purge` additionally renders the confirmation dialog.
pub async fn list_events(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(raw): Query<RawEventListParams>,
) -> HttpResult<Response> {
    let mut context = page_context(&actor);
    // Only the confirmation form posts; a confirm_purge link is a plain listing.
    if PageAction::from_params(&raw, &actor) == PageAction::RequestPurge {
        context.confirm_token = requested_token(&state, &actor)?;
    }
    render_page(&state, &actor, &raw, context).await
}

pub async fn submit_events(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    client: ClientInfo,
    Form(raw): Form<RawEventListParams>,
) -> HttpResult<Response> {
    let mut context = page_context(&actor);

    match PageAction::from_params(&raw, &actor) {
        PageAction::ConfirmPurge { token } => {
            let command = ConfirmPurgeCommand {
                token,
                ip: client.ip,
                user_agent: client.user_agent,
            };
            match state.services.event_commands.confirm_purge(&actor, command).await {
                Ok(_) => return Ok(Redirect::to(EVENTS_PATH).into_response()),
                Err(err) if err.is_storage_failure() => {
                    context.flash_error = Some(state.services.translator().text("PurgeFailed"));
                }
                Err(err) => return Err(HttpError::from_error(err)),
            }
        }
        PageAction::RequestPurge => {
            context.confirm_token = requested_token(&state, &actor)?;
        }
        PageAction::List => {}
    }

    render_page(&state, &actor, &raw, context).await
}

fn page_context(actor: &AuthenticatedUser) -> PageContext {
    PageContext {
        can_purge: actor.is_admin() && !actor.is_external(),
        ..Default::default()
    }
}

fn requested_token(state: &HttpState, actor: &AuthenticatedUser) -> HttpResult<Option<String>> {
    match state.services.event_commands.request_purge(actor).into_http()? {
        PurgeStep::Requested { token } => Ok(Some(token)),
        PurgeStep::Executed { .. } => Ok(None),
    }
}

async fn render_page(
    state: &HttpState,
    actor: &AuthenticatedUser,
    raw: &RawEventListParams,
    context: PageContext,
) -> HttpResult<Response> {
    let queries = &state.services.event_queries;
    let request = queries.parse_request(raw);
    let page = queries.list_events(actor, &request).await.into_http()?;

    let translator = state.services.translator();
    let html = views::render_listing(&page, &request, queries.settings(), translator.as_ref(), context)
        .map_err(|err| {
            tracing::error!(error = %err, "failed to render event listing");
            HttpError::internal("failed to render the page")
        })?;

    Ok(Html(html).into_response())
}

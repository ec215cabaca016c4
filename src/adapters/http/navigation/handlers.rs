//! HTTP handlers for navigation endpoints.
//!
//! Successful commands answer `200` with an empty body. Failures answer with
//! the status of the `NavigationError` and its message as plain text.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;

use crate::application::handlers::navigation::{
    CloseCommand, CloseHandler, ConfirmCommand, ConfirmHandler, DetailsCommand, DetailsHandler,
    NextCommand, NextHandler, PopupHandler, PreviousCommand, PreviousHandler,
    ShowAdditionalContentCommand, ShowContactsCommand, StartSupportCommand, StartSupportHandler,
};
use crate::domain::foundation::{ElementId, ProcessId, SessionId, ValidationError};
use crate::domain::session::NavigationError;

use super::dto::{
    ConfirmRequest, DetailsRequest, NextQuery, PreviousRequest, SessionRequest,
    ShowAdditionalContentRequest, ShowContactsRequest, StartSupportRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct NavigationHandlers {
    start_support: Arc<StartSupportHandler>,
    confirm: Arc<ConfirmHandler>,
    next: Arc<NextHandler>,
    previous: Arc<PreviousHandler>,
    details: Arc<DetailsHandler>,
    close: Arc<CloseHandler>,
    popups: Arc<PopupHandler>,
}

impl NavigationHandlers {
    pub fn new(
        start_support: Arc<StartSupportHandler>,
        confirm: Arc<ConfirmHandler>,
        next: Arc<NextHandler>,
        previous: Arc<PreviousHandler>,
        details: Arc<DetailsHandler>,
        close: Arc<CloseHandler>,
        popups: Arc<PopupHandler>,
    ) -> Self {
        Self {
            start_support,
            confirm,
            next,
            previous,
            details,
            close,
            popups,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /startSupport/:supportId - Start guided support for a process
pub async fn start_support(
    State(handlers): State<NavigationHandlers>,
    Path(support_id): Path<String>,
    Json(req): Json<StartSupportRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let cmd = StartSupportCommand {
            session_id: session_id(&req.session_id)?,
            token: SecretString::new(req.token),
            process_id: required(ProcessId::new(support_id))?,
            context: req.context.unwrap_or_default(),
        };
        handlers.start_support.handle(cmd).await
    }
    .await;
    navigation_response(result)
}

/// POST /navigate/confirm - Instantiate a follow-up process
pub async fn confirm(
    State(handlers): State<NavigationHandlers>,
    Json(req): Json<ConfirmRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let cmd = ConfirmCommand {
            session_id: session_id(&req.session_id)?,
            token: SecretString::new(req.token),
            process_id: required(ProcessId::new(req.process_id))?,
        };
        handlers.confirm.handle(cmd).await
    }
    .await;
    navigation_response(result)
}

/// POST /navigate/next?elementId= - Advance the active instance
pub async fn next(
    State(handlers): State<NavigationHandlers>,
    Query(query): Query<NextQuery>,
    Json(req): Json<SessionRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let element_id = match query.element_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => Some(required(ElementId::new(id))?),
            None => None,
        };
        let cmd = NextCommand {
            session_id: session_id(&req.session_id)?,
            token: SecretString::new(req.token),
            element_id,
        };
        handlers.next.handle(cmd).await
    }
    .await;
    navigation_response(result)
}

/// POST /navigate/previous - Replay a history entry
pub async fn previous(
    State(handlers): State<NavigationHandlers>,
    Json(req): Json<PreviousRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let cmd = PreviousCommand {
            session_id: session_id(&req.session_id)?,
            token: SecretString::new(req.token),
            index: req.index,
        };
        handlers.previous.handle(cmd).await
    }
    .await;
    navigation_response(result)
}

/// POST /navigate/details - Step into a call activity
pub async fn details(
    State(handlers): State<NavigationHandlers>,
    Json(req): Json<DetailsRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let cmd = DetailsCommand {
            session_id: session_id(&req.session_id)?,
            token: SecretString::new(req.token),
            activity_process_id: required(ProcessId::new(req.activity_process_id))?,
        };
        handlers.details.handle(cmd).await
    }
    .await;
    navigation_response(result)
}

/// POST /navigate/close - Cancel the process and close the display
pub async fn close(
    State(handlers): State<NavigationHandlers>,
    Json(req): Json<SessionRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let cmd = CloseCommand {
            session_id: session_id(&req.session_id)?,
            token: SecretString::new(req.token),
        };
        handlers.close.handle(cmd).await
    }
    .await;
    navigation_response(result)
}

/// POST /showContacts - Show the contacts popup
pub async fn show_contacts(
    State(handlers): State<NavigationHandlers>,
    Json(req): Json<ShowContactsRequest>,
) -> Response {
    if let Ok(session_id) = SessionId::new(req.session_id) {
        handlers
            .popups
            .show_contacts(ShowContactsCommand { session_id })
            .await;
    }
    StatusCode::OK.into_response()
}

/// POST /showAdditionalContent - Show additional content in a popup
pub async fn show_additional_content(
    State(handlers): State<NavigationHandlers>,
    Json(req): Json<ShowAdditionalContentRequest>,
) -> Response {
    let result: Result<(), NavigationError> = async {
        let cmd = ShowAdditionalContentCommand {
            session_id: session_id(&req.session_id)?,
            content_id: req.content_id,
        };
        handlers.popups.show_additional_content(cmd).await
    }
    .await;
    navigation_response(result)
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// A blank session id cannot name a registered session.
fn session_id(raw: &str) -> Result<SessionId, NavigationError> {
    SessionId::new(raw).map_err(|_| NavigationError::UnknownSession)
}

fn required<T>(value: Result<T, ValidationError>) -> Result<T, NavigationError> {
    value.map_err(|e| NavigationError::BadRequest(e.to_string()))
}

fn navigation_response(result: Result<(), NavigationError>) -> Response {
    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => handle_navigation_error(e),
    }
}

fn handle_navigation_error(error: NavigationError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error.message()).into_response()
}

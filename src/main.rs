//! Performance support service binary.

use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use performance_support::adapters::http::{app_router, NavigationHandlers, ProcessEventsAppState};
use performance_support::adapters::remote::{
    RemoteClient, RemoteContentEvents, RemoteContentService, RemoteExperienceService,
    RemoteIdentityService, RemotePresentationChannel, RemoteProcessEngine,
};
use performance_support::adapters::InMemorySessionStore;
use performance_support::application::handlers::navigation::{
    CloseHandler, ConfirmHandler, DetailsHandler, NextHandler, PopupHandler, PreviousHandler,
    StartSupportHandler,
};
use performance_support::application::handlers::process_events::ProcessEventRouter;
use performance_support::application::{AssistanceCompositor, ContentResolver, TerminalPages};
use performance_support::config::AppConfig;
use performance_support::domain::presentation::{DisplayActions, NavigationLinks};
use performance_support::ports::{
    ContentEventPublisher, ExperienceService, IdentityService, PresentationChannel, ProcessEngine,
    SessionStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let app = build_app(&config)?;

    let addr = config.server.socket_addr()?;
    info!(
        addr = %addr,
        base_path = config.server.normalized_base_path(),
        "Starting performance support service"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let directive = if config.features.debug_mode {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if config.json_logs() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Wires the remote adapters, the session store and the handlers into the
/// application router.
fn build_app(config: &AppConfig) -> Result<Router, Box<dyn std::error::Error>> {
    let http = reqwest::Client::new();
    let services = &config.services;

    let engine: Arc<dyn ProcessEngine> = Arc::new(RemoteProcessEngine::new(RemoteClient::new(
        http.clone(),
        &services.process_engine_url,
    )?));
    let content_service = Arc::new(RemoteContentService::new(RemoteClient::new(
        http.clone(),
        &services.content_service_url,
    )?));
    let experience: Arc<dyn ExperienceService> = Arc::new(RemoteExperienceService::new(
        RemoteClient::new(http.clone(), &services.experience_service_url)?,
    ));
    let presentation: Arc<dyn PresentationChannel> = Arc::new(RemotePresentationChannel::new(
        RemoteClient::new(http.clone(), &services.presentation_service_url)?,
        config.presentation.service_id.clone(),
    ));
    let identity: Arc<dyn IdentityService> = Arc::new(RemoteIdentityService::new(
        RemoteClient::new(http.clone(), &services.identity_service_url)?,
    ));
    let content_events: Arc<dyn ContentEventPublisher> = Arc::new(RemoteContentEvents::new(
        RemoteClient::new(http, &services.content_events_url)?,
    ));

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let links = NavigationLinks::new(&config.server.service_url())?;
    let pages = TerminalPages::new(DisplayActions::new(
        config.presentation.service_id.clone(),
        config.presentation.end_display_address.clone(),
        config.presentation.contact_address.clone(),
        config.presentation.feedback_form_path.clone(),
    ));
    let compositor = Arc::new(AssistanceCompositor::new(
        engine.clone(),
        Arc::new(ContentResolver::new(content_service)),
        presentation.clone(),
        content_events,
        links.clone(),
        pages,
    ));

    let navigation = NavigationHandlers::new(
        Arc::new(StartSupportHandler::new(
            store.clone(),
            identity,
            engine.clone(),
            compositor.clone(),
        )),
        Arc::new(ConfirmHandler::new(store.clone(), engine.clone())),
        Arc::new(NextHandler::new(
            store.clone(),
            engine.clone(),
            compositor.clone(),
        )),
        Arc::new(PreviousHandler::new(
            store.clone(),
            presentation.clone(),
            links,
        )),
        Arc::new(DetailsHandler::new(
            store.clone(),
            engine.clone(),
            compositor.clone(),
        )),
        Arc::new(CloseHandler::new(
            store.clone(),
            engine.clone(),
            presentation.clone(),
        )),
        Arc::new(PopupHandler::new(store.clone(), presentation.clone())),
    );
    let events = ProcessEventsAppState::spawn(Arc::new(ProcessEventRouter::new(
        store,
        engine,
        experience,
        presentation,
        compositor,
    )));

    let router = app_router(navigation, events, config.server.normalized_base_path());
    Ok(router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server.cors_origins_list())),
    ))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

//! AlumniConnect Backend
//!
//! A REST backend serving the alumni-network collections from a JSON document
//! store, with an optional upstream-API delegate.

mod api;
mod auth;
mod backend;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::Backend;
use config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AlumniConnect Backend");
    tracing::info!("Seed file: {:?}", config.seed_file);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if no admin token is configured
    if config.admin_token.is_none() {
        tracing::warn!("No admin token configured (ADMIN_API_TOKEN). Write endpoints are open!");
    }

    // Select and initialize the data backend
    let backend = backend::from_config(&config).await?;

    // Create application state
    let state = AppState {
        backend,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Read routes are open
    let read_routes = Router::new()
        // Events
        .route("/events", get(api::list_events))
        .route("/events/{id}", get(api::get_event))
        // Chapters
        .route("/chapters", get(api::list_chapters))
        .route("/chapters/{id}", get(api::get_chapter))
        // Sponsors
        .route("/sponsors", get(api::list_sponsors))
        .route("/sponsors/{id}", get(api::get_sponsor))
        // Partners
        .route("/partners", get(api::list_partners))
        .route("/partners/{id}", get(api::get_partner))
        // Opportunities
        .route("/opportunities", get(api::list_opportunities))
        .route("/opportunities/{id}", get(api::get_opportunity))
        // Mentorships
        .route("/mentorships", get(api::list_mentorships))
        .route("/mentorships/{id}", get(api::get_mentorship))
        // Q&A
        .route("/qa", get(api::list_questions))
        .route("/qa/{id}", get(api::get_question))
        // Spotlights
        .route("/spotlights", get(api::list_spotlights))
        .route("/spotlights/{id}", get(api::get_spotlight))
        // Users
        .route("/users", get(api::list_users))
        .route("/users/{id}", get(api::get_user))
        // Applications
        .route("/applications", get(api::list_applications))
        .route("/applications/{id}", get(api::get_application));

    // Write routes require the admin token
    let admin_token = state.config.admin_token.clone();
    let write_routes = Router::new()
        // Events
        .route("/events", post(api::create_event))
        .route("/events/batch-delete", post(api::batch_delete_events))
        .route("/events/{id}", put(api::update_event))
        .route("/events/{id}", patch(api::patch_event))
        .route("/events/{id}", delete(api::delete_event))
        .route("/events/{id}/publish", post(api::publish_event))
        .route("/events/{id}/rsvp", post(api::rsvp_to_event))
        // Chapters
        .route("/chapters", post(api::create_chapter))
        .route("/chapters/{id}", put(api::update_chapter))
        .route("/chapters/{id}", patch(api::patch_chapter))
        .route("/chapters/{id}", delete(api::delete_chapter))
        .route("/chapters/{id}/activate", post(api::activate_chapter))
        // Sponsors
        .route("/sponsors", post(api::create_sponsor))
        .route("/sponsors/{id}", put(api::update_sponsor))
        .route("/sponsors/{id}", patch(api::patch_sponsor))
        .route("/sponsors/{id}", delete(api::delete_sponsor))
        // Partners
        .route("/partners", post(api::create_partner))
        .route("/partners/{id}", put(api::update_partner))
        .route("/partners/{id}", patch(api::patch_partner))
        .route("/partners/{id}", delete(api::delete_partner))
        // Opportunities
        .route("/opportunities", post(api::create_opportunity))
        .route("/opportunities/{id}", put(api::update_opportunity))
        .route("/opportunities/{id}", patch(api::patch_opportunity))
        .route("/opportunities/{id}", delete(api::delete_opportunity))
        .route("/opportunities/{id}/close", post(api::close_opportunity))
        // Mentorships
        .route("/mentorships", post(api::create_mentorship))
        .route("/mentorships/{id}", put(api::update_mentorship))
        .route("/mentorships/{id}", patch(api::patch_mentorship))
        .route("/mentorships/{id}", delete(api::delete_mentorship))
        // Q&A
        .route("/qa", post(api::create_question))
        .route("/qa/{id}", put(api::update_question))
        .route("/qa/{id}", patch(api::patch_question))
        .route("/qa/{id}", delete(api::delete_question))
        .route("/qa/{id}/answer", post(api::answer_question))
        // Spotlights
        .route("/spotlights", post(api::create_spotlight))
        .route("/spotlights/{id}", put(api::update_spotlight))
        .route("/spotlights/{id}", patch(api::patch_spotlight))
        .route("/spotlights/{id}", delete(api::delete_spotlight))
        // Users
        .route("/users", post(api::create_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", patch(api::patch_user))
        .route("/users/{id}", delete(api::delete_user))
        // Applications
        .route("/applications", post(api::create_application))
        .route("/applications/{id}", put(api::update_application))
        .route("/applications/{id}", patch(api::patch_application))
        .route("/applications/{id}", delete(api::delete_application))
        // Apply admin auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(admin_token.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", read_routes.merge(write_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;

//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{health, import, raiderio, roster};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (mounted at the root, outside /api/v1)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(roster_routes())
}

/// Roster routes
fn roster_routes() -> Router<AppState> {
    Router::new()
        // Roster aggregate
        .route("/roster", get(roster::get_roster))
        .route("/roster", put(roster::save_roster))
        // Per-member mutations
        .route(
            "/roster/members/:name/spec",
            patch(roster::update_member_spec),
        )
        .route(
            "/roster/members/:name/note",
            patch(roster::update_member_note),
        )
        // Addon export import
        .route("/roster/updates", get(import::check_for_updates))
        .route("/roster/updates/apply", post(import::apply_update))
        // Merge preview
        .route("/roster/merge/preview", post(roster::merge_preview))
        // Raider.IO enrichment
        .route("/roster/raiderio/sync", post(raiderio::sync))
}

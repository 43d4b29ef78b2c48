pub mod game;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/games", post(game::create_game))
        .route("/games/import", post(game::import_game))
        .route("/games/{id}", get(game::get_game).delete(game::delete_game))
        .route("/games/{id}/stage", post(game::stage_tile))
        .route("/games/{id}/clear", post(game::clear_move))
        .route("/games/{id}/validate", post(game::validate_move))
        .route("/games/{id}/commit", post(game::commit_move))
        .route("/games/{id}/pass", post(game::pass_turn))
}

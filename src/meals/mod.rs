pub(crate) mod dto;
pub mod handlers;
mod repo;
pub(crate) mod repo_types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::meal_routes())
        .merge(handlers::food_item_routes())
}

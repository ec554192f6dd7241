use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get::get_dashboard))
}

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

pub fn weather_routes() -> Router<AppState> {
    Router::new().route("/", get(get::get_weather))
}

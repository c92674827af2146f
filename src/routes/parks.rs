//! Park CRUD routes: the `/parks` collection and its members.

use crate::handlers::parks::{create_park, delete_park, list_parks, patch_park, read_park, replace_park};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn park_routes(state: AppState) -> Router {
    Router::new()
        .route("/parks", get(list_parks).post(create_park))
        .route(
            "/parks/:id",
            get(read_park).put(replace_park).patch(patch_park).delete(delete_park),
        )
        .with_state(state)
}

//! Response helpers shared by the park handlers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 201 with the created body and a `Location` header.
pub fn created<T: Serialize>(location: &str, data: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(data)).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Location of a member resource under the collection path the request arrived on.
pub fn member_location(collection_path: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", collection_path.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_collection_and_id() {
        assert_eq!(member_location("/api/parks", 7), "/api/parks/7");
        assert_eq!(member_location("/api/parks/", 7), "/api/parks/7");
    }

    #[test]
    fn created_sets_status_and_location() {
        let response = created("/api/parks/7", serde_json::json!({"id": 7}));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/parks/7");
    }
}

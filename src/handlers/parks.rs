//! Park CRUD handlers: list, create, read, replace, patch, delete.

use crate::error::{AppError, ErrorBody};
use crate::model::{Park, ParkFilter, ParkInput};
use crate::response::{created, member_location};
use crate::service::{ParkService, RequestValidator, PARK_RULES};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::{Map, Value};

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

fn body_to_map(payload: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    let Json(value) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Validate every rule first so all field errors are reported together, then deserialize.
fn parse_input(payload: Result<Json<Value>, JsonRejection>) -> Result<ParkInput, AppError> {
    let body = body_to_map(payload)?;
    RequestValidator::validate(&body, PARK_RULES)?;
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// List parks, optionally filtered by substrings of name, category and state.
#[utoipa::path(
    get,
    path = "/api/parks",
    tag = "parks",
    params(ParkFilter),
    responses(
        (status = 200, description = "Parks matching every supplied filter", body = [Park]),
        (status = 400, description = "Malformed query string", body = ErrorBody)
    )
)]
pub async fn list_parks(
    State(state): State<AppState>,
    query: Result<Query<ParkFilter>, QueryRejection>,
) -> Result<Json<Vec<Park>>, AppError> {
    let Query(filter) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let parks = ParkService::list(state.parks.as_ref(), &filter).await?;
    Ok(Json(parks))
}

#[utoipa::path(
    post,
    path = "/api/parks",
    tag = "parks",
    request_body = ParkInput,
    responses(
        (status = 201, description = "Park created", body = Park),
        (status = 400, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create_park(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let input = parse_input(payload)?;
    let park = ParkService::create(state.parks.as_ref(), &input).await?;
    let location = member_location(uri.path(), park.id);
    Ok(created(&location, park))
}

#[utoipa::path(
    get,
    path = "/api/parks/{id}",
    tag = "parks",
    params(("id" = i32, Path, description = "Park id")),
    responses(
        (status = 200, description = "The park", body = Park),
        (status = 404, description = "No park with this id", body = ErrorBody)
    )
)]
pub async fn read_park(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Park>, AppError> {
    let id = parse_id(&id_str)?;
    let park = ParkService::read(state.parks.as_ref(), id).await?;
    Ok(Json(park))
}

/// Overwrite a park. The body id must match the path id.
#[utoipa::path(
    put,
    path = "/api/parks/{id}",
    tag = "parks",
    params(("id" = i32, Path, description = "Park id")),
    request_body = ParkInput,
    responses(
        (status = 204, description = "Park replaced"),
        (status = 400, description = "Validation failed or ids differ", body = ErrorBody),
        (status = 404, description = "No park with this id", body = ErrorBody),
        (status = 500, description = "Park changed concurrently", body = ErrorBody)
    )
)]
pub async fn replace_park(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    let input = parse_input(payload)?;
    ParkService::replace(state.parks.as_ref(), id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Same whole-record overwrite as PUT.
#[utoipa::path(
    patch,
    path = "/api/parks/{id}",
    tag = "parks",
    params(("id" = i32, Path, description = "Park id")),
    request_body = ParkInput,
    responses(
        (status = 204, description = "Park replaced"),
        (status = 400, description = "Validation failed or ids differ", body = ErrorBody),
        (status = 404, description = "No park with this id", body = ErrorBody),
        (status = 500, description = "Park changed concurrently", body = ErrorBody)
    )
)]
pub async fn patch_park(
    state: State<AppState>,
    id: Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    replace_park(state, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/parks/{id}",
    tag = "parks",
    params(("id" = i32, Path, description = "Park id")),
    responses(
        (status = 204, description = "Park deleted"),
        (status = 404, description = "No park with this id", body = ErrorBody)
    )
)]
pub async fn delete_park(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    ParkService::delete(state.parks.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = body_to_map(Ok(Json(serde_json::json!([1, 2])))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}

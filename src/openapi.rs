//! OpenAPI document for the park endpoints, served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::parks;
use crate::model::{Park, ParkInput};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ParkApi",
        description = "An API for creating a list of US National and State parks"
    ),
    paths(
        parks::list_parks,
        parks::create_park,
        parks::read_park,
        parks::replace_park,
        parks::patch_park,
        parks::delete_park
    ),
    components(schemas(Park, ParkInput, ErrorBody, ErrorDetail)),
    tags((name = "parks", description = "US national and state park records"))
)]
pub struct ApiDoc;

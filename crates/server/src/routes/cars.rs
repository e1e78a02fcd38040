use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use common::types::Deleted;
use models::Car;
use tracing::{debug, info};

use crate::envelope::Success;
use crate::errors::ApiError;
use crate::state::ServerState;

/// Accept exactly one positive integer path segment.
fn parse_id(raw: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let invalid = || ApiError::bad_request("invalid id");
    let Ok(Path(raw)) = raw else {
        return Err(invalid());
    };
    if raw.is_empty() || raw.contains('/') {
        return Err(invalid());
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

fn parse_body(payload: Result<Json<Option<Car>>, JsonRejection>) -> Result<Option<Car>, ApiError> {
    match payload {
        Ok(Json(car)) => Ok(car),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "rejected request body");
            Err(ApiError::bad_request("invalid json body"))
        }
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// `/cars/` with nothing after the slash, for any method.
pub async fn missing_id() -> ApiError {
    ApiError::bad_request("invalid id")
}

/// Unsupported method on `/cars/{id}`: a malformed id still wins.
pub async fn item_method_not_allowed(raw_id: Result<Path<String>, PathRejection>) -> ApiError {
    match parse_id(raw_id) {
        Ok(_) => ApiError::method_not_allowed(),
        Err(err) => err,
    }
}

#[utoipa::path(
    get, path = "/cars", tag = "cars",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list_cars(State(state): State<ServerState>) -> Result<Success<Vec<Car>>, ApiError> {
    let cars = state
        .cars
        .get_all()
        .await
        .map_err(|e| ApiError::from_service(e, "failed to fetch cars"))?;
    Ok(Success::ok(cars))
}

#[utoipa::path(
    post, path = "/cars", tag = "cars",
    request_body = crate::openapi::CarInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid body or validation error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create_car(
    State(state): State<ServerState>,
    payload: Result<Json<Option<Car>>, JsonRejection>,
) -> Result<Success<Car>, ApiError> {
    let input = parse_body(payload)?;
    let created = state
        .cars
        .create(input)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to create car"))?;
    info!(id = created.id, vin = %created.vin, "created car");
    Ok(Success::created(created))
}

#[utoipa::path(
    get, path = "/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Fetch Failed")
    )
)]
pub async fn get_car(
    State(state): State<ServerState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Success<Car>, ApiError> {
    let id = parse_id(raw_id)?;
    let car = state
        .cars
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to fetch car"))?;
    Ok(Success::ok(car))
}

#[utoipa::path(
    put, path = "/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = crate::openapi::CarInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid id, body or validation error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update_car(
    State(state): State<ServerState>,
    raw_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Option<Car>>, JsonRejection>,
) -> Result<Success<Car>, ApiError> {
    let id = parse_id(raw_id)?;
    let input = parse_body(payload)?.map(|car| Car { id, ..car });
    let updated = state
        .cars
        .update(input)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to update car"))?;
    info!(id = updated.id, "updated car");
    Ok(Success::ok(updated))
}

#[utoipa::path(
    delete, path = "/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete_car(
    State(state): State<ServerState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Success<Deleted>, ApiError> {
    let id = parse_id(raw_id)?;
    state
        .cars
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to delete car"))?;
    info!(id, "deleted car");
    Ok(Success::ok(Deleted { deleted: true }))
}

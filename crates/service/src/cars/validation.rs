use models::car::{Car, MAX_YEAR, MIN_YEAR};

use crate::errors::ServiceError;

/// Check a car payload against the record rules.
///
/// Rules run in a fixed order and the first failure is reported. The same
/// rules apply to create and update.
pub fn validate_car(car: Option<Car>) -> Result<Car, ServiceError> {
    let Some(car) = car else {
        return Err(ServiceError::validation("car payload is required"));
    };
    if car.inventory_id <= 0 {
        return Err(ServiceError::validation("inventory_id must be positive"));
    }
    if car.make.trim().is_empty() {
        return Err(ServiceError::validation("make is required"));
    }
    if car.model.trim().is_empty() {
        return Err(ServiceError::validation("model is required"));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&car.year) {
        return Err(ServiceError::validation(format!("year must be between {MIN_YEAR} and {MAX_YEAR}")));
    }
    if car.color.trim().is_empty() {
        return Err(ServiceError::validation("color is required"));
    }
    if car.vin.trim().is_empty() {
        return Err(ServiceError::validation("vin is required"));
    }
    Ok(car)
}

pub fn validate_id(id: i64) -> Result<i64, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::validation("id must be positive"));
    }
    Ok(id)
}

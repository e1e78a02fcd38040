use std::sync::Arc;

use models::Car;
use tracing::{debug, info, instrument};

use crate::cars::repository::CarRepository;
use crate::cars::validation::{validate_car, validate_id};
use crate::errors::ServiceError;

/// Application service encapsulating car business rules.
/// Validates input before storage is touched and returns the stored state
/// re-read after every write.
pub struct CarService<R: CarRepository> {
    repo: Arc<R>,
}

impl<R: CarRepository> CarService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip_all)]
    pub async fn create(&self, car: Option<Car>) -> Result<Car, ServiceError> {
        let mut car = validate_car(car)?;
        self.repo.create(&mut car).await?;
        info!(id = car.id, inventory_id = car.inventory_id, "car created");
        Ok(self.repo.get_by_id(car.id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Car, ServiceError> {
        let id = validate_id(id)?;
        Ok(self.repo.get_by_id(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Car>, ServiceError> {
        let cars = self.repo.get_all().await?;
        debug!(count = cars.len(), "listed cars");
        Ok(cars)
    }

    /// Replace every field of the car identified by `car.id`.
    ///
    /// A concurrent delete between the write and the re-read surfaces as
    /// `NotFound`.
    #[instrument(skip_all, fields(id = car.as_ref().map(|c| c.id).unwrap_or_default()))]
    pub async fn update(&self, car: Option<Car>) -> Result<Car, ServiceError> {
        let car = match car {
            Some(c) => {
                validate_id(c.id)?;
                validate_car(Some(c))?
            }
            None => validate_car(None)?,
        };
        self.repo.update(&car).await?;
        info!(id = car.id, "car updated");
        Ok(self.repo.get_by_id(car.id).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let id = validate_id(id)?;
        self.repo.delete(id).await?;
        info!(id, "car deleted");
        Ok(())
    }
}

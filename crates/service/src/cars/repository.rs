use std::sync::Arc;

use async_trait::async_trait;
use models::Car;
use thiserror::Error;

use crate::storage::{Param, Row, Storage, StorageError};

pub(crate) mod queries {
    pub const INSERT_CAR: &str =
        "INSERT INTO cars (inventory_id, make, model, year, color, vin) VALUES (?, ?, ?, ?, ?, ?)";
    pub const SELECT_CAR_BY_ID: &str =
        "SELECT id, inventory_id, make, model, year, color, vin FROM cars WHERE id = ?";
    pub const SELECT_ALL_CARS: &str =
        "SELECT id, inventory_id, make, model, year, color, vin FROM cars ORDER BY id ASC";
    pub const UPDATE_CAR: &str = "UPDATE cars SET inventory_id = ?, make = ?, model = ?, year = ?, color = ?, vin = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?";
    pub const DELETE_CAR: &str = "DELETE FROM cars WHERE id = ?";
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("car not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Insert `car` and write the generated id back into it.
    async fn create(&self, car: &mut Car) -> Result<(), RepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<Car, RepositoryError>;
    /// All cars ordered by id ascending.
    async fn get_all(&self) -> Result<Vec<Car>, RepositoryError>;
    async fn update(&self, car: &Car) -> Result<(), RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Repository issuing parameterized SQL through a [`Storage`] handle.
#[derive(Clone)]
pub struct SqlCarRepository {
    storage: Arc<dyn Storage>,
}

impl SqlCarRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self { Self { storage } }
}

fn car_from_row(row: &dyn Row) -> Result<Car, StorageError> {
    Ok(Car {
        id: row.get_i64(0)?,
        inventory_id: row.get_i64(1)?,
        make: row.get_string(2)?,
        model: row.get_string(3)?,
        year: row.get_i32(4)?,
        color: row.get_string(5)?,
        vin: row.get_string(6)?,
    })
}

#[async_trait]
impl CarRepository for SqlCarRepository {
    async fn create(&self, car: &mut Car) -> Result<(), RepositoryError> {
        let params: Vec<Param> = vec![
            car.inventory_id.into(),
            car.make.clone().into(),
            car.model.clone().into(),
            car.year.into(),
            car.color.clone().into(),
            car.vin.clone().into(),
        ];
        let outcome = self.storage.execute(queries::INSERT_CAR, params).await?;
        car.id = outcome.last_insert_id.ok_or(StorageError::MissingInsertId)?;
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Car, RepositoryError> {
        let row = self
            .storage
            .query_one(queries::SELECT_CAR_BY_ID, vec![id.into()])
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(car_from_row(row.as_ref())?)
    }

    async fn get_all(&self) -> Result<Vec<Car>, RepositoryError> {
        let rows = self.storage.query_many(queries::SELECT_ALL_CARS, Vec::new()).await?;
        let mut cars = Vec::new();
        for row in rows {
            cars.push(car_from_row(row.as_ref())?);
        }
        Ok(cars)
    }

    async fn update(&self, car: &Car) -> Result<(), RepositoryError> {
        let params: Vec<Param> = vec![
            car.inventory_id.into(),
            car.make.clone().into(),
            car.model.clone().into(),
            car.year.into(),
            car.color.clone().into(),
            car.vin.clone().into(),
            car.id.into(),
        ];
        let outcome = self.storage.execute(queries::UPDATE_CAR, params).await?;
        if outcome.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let outcome = self.storage.execute(queries::DELETE_CAR, vec![id.into()]).await?;
        if outcome.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStorage, SeaOrmStorage};
    use crate::test_support::get_db;

    fn car(make: &str, model: &str, year: i32, color: &str, vin: &str) -> Car {
        Car { id: 0, inventory_id: 1, make: make.into(), model: model.into(), year, color: color.into(), vin: vin.into() }
    }

    fn memory_repo() -> (Arc<InMemoryStorage>, SqlCarRepository) {
        let storage = Arc::new(InMemoryStorage::new());
        (storage.clone(), SqlCarRepository::new(storage))
    }

    async fn sqlite_repo() -> Result<SqlCarRepository, anyhow::Error> {
        let db = get_db().await?;
        Ok(SqlCarRepository::new(Arc::new(SeaOrmStorage::new(db))))
    }

    async fn create_and_get(repo: &SqlCarRepository) -> Result<(), anyhow::Error> {
        let mut c = car("Honda", "Civic", 2020, "Blue", "VIN-1");
        repo.create(&mut c).await?;
        assert!(c.id > 0);
        let got = repo.get_by_id(c.id).await?;
        assert_eq!(got, c);
        Ok(())
    }

    async fn update_then_delete(repo: &SqlCarRepository) -> Result<(), anyhow::Error> {
        let mut c = car("Nissan", "Sentra", 2018, "Red", "VIN-4");
        repo.create(&mut c).await?;
        c.color = "Black".into();
        repo.update(&c).await?;
        assert_eq!(repo.get_by_id(c.id).await?.color, "Black");

        repo.delete(c.id).await?;
        assert!(matches!(repo.get_by_id(c.id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.delete(c.id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.update(&c).await, Err(RepositoryError::NotFound)));
        Ok(())
    }

    async fn list_in_id_order(repo: &SqlCarRepository) -> Result<(), anyhow::Error> {
        assert!(repo.get_all().await?.is_empty());
        let mut a = car("Ford", "Focus", 2019, "Gray", "VIN-2");
        let mut b = car("Toyota", "Corolla", 2021, "White", "VIN-3");
        repo.create(&mut a).await?;
        repo.create(&mut b).await?;
        let all = repo.get_all().await?;
        assert_eq!(all, vec![a, b]);
        Ok(())
    }

    #[tokio::test]
    async fn memory_create_and_get() -> Result<(), anyhow::Error> {
        create_and_get(&memory_repo().1).await
    }

    #[tokio::test]
    async fn memory_update_then_delete() -> Result<(), anyhow::Error> {
        update_then_delete(&memory_repo().1).await
    }

    #[tokio::test]
    async fn memory_list_in_id_order() -> Result<(), anyhow::Error> {
        list_in_id_order(&memory_repo().1).await
    }

    #[tokio::test]
    async fn sqlite_create_and_get() -> Result<(), anyhow::Error> {
        create_and_get(&sqlite_repo().await?).await
    }

    #[tokio::test]
    async fn sqlite_update_then_delete() -> Result<(), anyhow::Error> {
        update_then_delete(&sqlite_repo().await?).await
    }

    #[tokio::test]
    async fn sqlite_list_in_id_order() -> Result<(), anyhow::Error> {
        list_in_id_order(&sqlite_repo().await?).await
    }

    #[tokio::test]
    async fn sqlite_update_of_unchanged_row_still_counts() -> Result<(), anyhow::Error> {
        let repo = sqlite_repo().await?;
        let mut c = car("Mazda", "3", 2022, "Green", "VIN-5");
        repo.create(&mut c).await?;
        repo.update(&c).await?;
        repo.update(&c).await?;
        assert_eq!(repo.get_by_id(c.id).await?, c);
        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_are_not_not_found() {
        let (storage, repo) = memory_repo();
        storage.set_failing(true);
        assert!(matches!(repo.get_by_id(1).await, Err(RepositoryError::Storage(_))));
        assert!(matches!(repo.get_all().await, Err(RepositoryError::Storage(_))));
        assert!(matches!(repo.delete(1).await, Err(RepositoryError::Storage(_))));
        let mut c = car("Kia", "Rio", 2015, "Red", "VIN-6");
        assert!(matches!(repo.create(&mut c).await, Err(RepositoryError::Storage(_))));
        assert_eq!(c.id, 0);
    }
}

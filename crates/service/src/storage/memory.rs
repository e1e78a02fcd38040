//! In-process [`Storage`] double.
//!
//! Understands exactly the statements issued by
//! [`SqlCarRepository`](crate::cars::repository::SqlCarRepository) and keeps
//! rows in an ordered map. Every call is counted, and the store can be put
//! into a failing mode to exercise storage error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use models::Car;

use super::{ExecOutcome, Param, Row, Rows, Storage, StorageError};
use crate::cars::repository::queries;

#[derive(Default)]
struct Table {
    last_id: i64,
    cars: BTreeMap<i64, Car>,
}

#[derive(Default)]
pub struct InMemoryStorage {
    table: Mutex<Table>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self { Self::default() }

    /// Number of port operations issued so far.
    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    /// Make every following operation fail with a database error.
    pub fn set_failing(&self, failing: bool) { self.failing.store(failing, Ordering::SeqCst) }

    /// Number of stored rows, read without counting as a call.
    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.cars.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn enter(&self) -> Result<MutexGuard<'_, Table>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Db("injected storage failure".into()));
        }
        self.table.lock().map_err(|_| StorageError::Db("in-memory table poisoned".into()))
    }
}

fn int(params: &[Param], index: usize) -> Result<i64, StorageError> {
    match params.get(index) {
        Some(Param::Int(v)) => Ok(*v),
        other => Err(StorageError::Decode { index, message: format!("expected integer parameter, got {other:?}") }),
    }
}

fn text(params: &[Param], index: usize) -> Result<String, StorageError> {
    match params.get(index) {
        Some(Param::Text(v)) => Ok(v.clone()),
        other => Err(StorageError::Decode { index, message: format!("expected text parameter, got {other:?}") }),
    }
}

fn year(params: &[Param], index: usize) -> Result<i32, StorageError> {
    let v = int(params, index)?;
    i32::try_from(v).map_err(|e| StorageError::Decode { index, message: e.to_string() })
}

/// Column values in `SELECT id, inventory_id, make, model, year, color, vin` order.
struct MemoryRow(Vec<Param>);

impl From<&Car> for MemoryRow {
    fn from(car: &Car) -> Self {
        MemoryRow(vec![
            car.id.into(),
            car.inventory_id.into(),
            car.make.clone().into(),
            car.model.clone().into(),
            car.year.into(),
            car.color.clone().into(),
            car.vin.clone().into(),
        ])
    }
}

impl Row for MemoryRow {
    fn get_i64(&self, index: usize) -> Result<i64, StorageError> { int(&self.0, index) }
    fn get_i32(&self, index: usize) -> Result<i32, StorageError> { year(&self.0, index) }
    fn get_string(&self, index: usize) -> Result<String, StorageError> { text(&self.0, index) }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn execute(&self, sql: &str, params: Vec<Param>) -> Result<ExecOutcome, StorageError> {
        let mut table = self.enter()?;
        match sql {
            queries::INSERT_CAR => {
                table.last_id += 1;
                let id = table.last_id;
                let car = Car {
                    id,
                    inventory_id: int(&params, 0)?,
                    make: text(&params, 1)?,
                    model: text(&params, 2)?,
                    year: year(&params, 3)?,
                    color: text(&params, 4)?,
                    vin: text(&params, 5)?,
                };
                table.cars.insert(id, car);
                Ok(ExecOutcome { rows_affected: 1, last_insert_id: Some(id) })
            }
            queries::UPDATE_CAR => {
                let id = int(&params, 6)?;
                let Some(car) = table.cars.get_mut(&id) else {
                    return Ok(ExecOutcome::default());
                };
                car.inventory_id = int(&params, 0)?;
                car.make = text(&params, 1)?;
                car.model = text(&params, 2)?;
                car.year = year(&params, 3)?;
                car.color = text(&params, 4)?;
                car.vin = text(&params, 5)?;
                Ok(ExecOutcome { rows_affected: 1, last_insert_id: None })
            }
            queries::DELETE_CAR => {
                let id = int(&params, 0)?;
                let removed = table.cars.remove(&id).map_or(0, |_| 1);
                Ok(ExecOutcome { rows_affected: removed, last_insert_id: None })
            }
            other => Err(StorageError::Unsupported(other.to_string())),
        }
    }

    async fn query_one(&self, sql: &str, params: Vec<Param>) -> Result<Option<Box<dyn Row>>, StorageError> {
        let table = self.enter()?;
        if sql != queries::SELECT_CAR_BY_ID {
            return Err(StorageError::Unsupported(sql.to_string()));
        }
        let id = int(&params, 0)?;
        Ok(table.cars.get(&id).map(|car| Box::new(MemoryRow::from(car)) as Box<dyn Row>))
    }

    async fn query_many(&self, sql: &str, _params: Vec<Param>) -> Result<Rows, StorageError> {
        let table = self.enter()?;
        if sql != queries::SELECT_ALL_CARS {
            return Err(StorageError::Unsupported(sql.to_string()));
        }
        let rows: Vec<Box<dyn Row>> = table
            .cars
            .values()
            .map(|car| Box::new(MemoryRow::from(car)) as Box<dyn Row>)
            .collect();
        Ok(Rows::new(rows.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_params(vin: &str) -> Vec<Param> {
        vec![1_i64.into(), "Ford".into(), "Focus".into(), 2019_i32.into(), "Gray".into(), vin.into()]
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = InMemoryStorage::new();
        let first = store.execute(queries::INSERT_CAR, insert_params("VIN-1")).await.unwrap();
        store.execute(queries::DELETE_CAR, vec![first.last_insert_id.unwrap().into()]).await.unwrap();
        let second = store.execute(queries::INSERT_CAR, insert_params("VIN-2")).await.unwrap();
        assert_eq!(first.last_insert_id, Some(1));
        assert_eq!(second.last_insert_id, Some(2));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn unknown_statements_are_rejected() {
        let store = InMemoryStorage::new();
        let err = store.execute("DROP TABLE cars", vec![]).await.unwrap_err();
        assert!(matches!(err, StorageError::Unsupported(_)));
    }

    #[tokio::test]
    async fn failing_mode_counts_and_fails() {
        let store = InMemoryStorage::new();
        store.set_failing(true);
        let err = store.query_many(queries::SELECT_ALL_CARS, vec![]).await.err().unwrap();
        assert!(matches!(err, StorageError::Db(_)));
        assert_eq!(store.calls(), 1);
        store.set_failing(false);
        assert_eq!(store.query_many(queries::SELECT_ALL_CARS, vec![]).await.unwrap().count(), 0);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn wrong_parameter_types_are_decode_errors() {
        let store = InMemoryStorage::new();
        let err = store.query_one(queries::SELECT_CAR_BY_ID, vec!["seven".into()]).await.err().unwrap();
        assert!(matches!(err, StorageError::Decode { index: 0, .. }));
    }
}

//! Storage port.
//!
//! The repository talks to the database only through [`Storage`]: execute a
//! mutating statement, fetch one row, or fetch many rows, each with positional
//! parameters. [`seaorm::SeaOrmStorage`] is the production adapter and
//! [`memory::InMemoryStorage`] is the in-process double used by tests.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod seaorm;

pub use memory::InMemoryStorage;
pub use seaorm::SeaOrmStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Db(String),
    #[error("cannot decode column {index}: {message}")]
    Decode { index: usize, message: String },
    #[error("statement did not report a generated id")]
    MissingInsertId,
    #[error("unsupported statement: {0}")]
    Unsupported(String),
}

/// Positional statement parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self { Param::Int(v) }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self { Param::Int(i64::from(v)) }
}

impl From<String> for Param {
    fn from(v: String) -> Self { Param::Text(v) }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self { Param::Text(v.to_string()) }
}

/// Outcome of a mutating statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Identity generated by an insert, when the engine reports one.
    pub last_insert_id: Option<i64>,
}

/// One result row with typed, positional column access.
pub trait Row: Send {
    fn get_i64(&self, index: usize) -> Result<i64, StorageError>;
    fn get_i32(&self, index: usize) -> Result<i32, StorageError>;
    fn get_string(&self, index: usize) -> Result<String, StorageError>;
}

/// Finite, one-shot sequence of rows. Consumed by iterating it.
pub struct Rows {
    inner: Box<dyn Iterator<Item = Box<dyn Row>> + Send>,
}

impl Rows {
    pub fn new<I>(rows: I) -> Self
    where
        I: Iterator<Item = Box<dyn Row>> + Send + 'static,
    {
        Self { inner: Box::new(rows) }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Iterator for Rows {
    type Item = Box<dyn Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn execute(&self, sql: &str, params: Vec<Param>) -> Result<ExecOutcome, StorageError>;
    /// `Ok(None)` when the statement yields no rows.
    async fn query_one(&self, sql: &str, params: Vec<Param>) -> Result<Option<Box<dyn Row>>, StorageError>;
    async fn query_many(&self, sql: &str, params: Vec<Param>) -> Result<Rows, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(i64);

    impl Row for Fixed {
        fn get_i64(&self, _: usize) -> Result<i64, StorageError> { Ok(self.0) }
        fn get_i32(&self, index: usize) -> Result<i32, StorageError> {
            i32::try_from(self.0).map_err(|e| StorageError::Decode { index, message: e.to_string() })
        }
        fn get_string(&self, index: usize) -> Result<String, StorageError> {
            Err(StorageError::Decode { index, message: "not text".into() })
        }
    }

    #[test]
    fn rows_are_consumed_once() {
        let mut rows = Rows::new(vec![Box::new(Fixed(1)) as Box<dyn Row>, Box::new(Fixed(2))].into_iter());
        assert_eq!(rows.next().unwrap().get_i64(0).unwrap(), 1);
        assert_eq!(rows.next().unwrap().get_i64(0).unwrap(), 2);
        assert!(rows.next().is_none());
        assert!(rows.next().is_none());
    }

    #[test]
    fn empty_rows_yield_nothing() {
        assert_eq!(Rows::empty().count(), 0);
    }

    #[test]
    fn params_convert_from_primitives() {
        assert_eq!(Param::from(2018_i32), Param::Int(2018));
        assert_eq!(Param::from("VIN-1"), Param::Text("VIN-1".into()));
    }
}

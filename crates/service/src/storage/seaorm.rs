use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement, Value};

use super::{ExecOutcome, Param, Row, Rows, Storage, StorageError};

/// [`Storage`] backed by a pooled sea-orm connection.
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn statement(&self, sql: &str, params: Vec<Param>) -> Statement {
        Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            params.into_iter().map(to_value),
        )
    }
}

fn to_value(p: Param) -> Value {
    match p {
        Param::Int(v) => Value::from(v),
        Param::Text(v) => Value::from(v),
    }
}

impl From<DbErr> for StorageError {
    fn from(e: DbErr) -> Self { StorageError::Db(e.to_string()) }
}

fn decode(index: usize) -> impl FnOnce(DbErr) -> StorageError {
    move |e| StorageError::Decode { index, message: e.to_string() }
}

impl Row for QueryResult {
    fn get_i64(&self, index: usize) -> Result<i64, StorageError> {
        self.try_get_by_index::<i64>(index).map_err(decode(index))
    }

    fn get_i32(&self, index: usize) -> Result<i32, StorageError> {
        self.try_get_by_index::<i32>(index).map_err(decode(index))
    }

    fn get_string(&self, index: usize) -> Result<String, StorageError> {
        self.try_get_by_index::<String>(index).map_err(decode(index))
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn execute(&self, sql: &str, params: Vec<Param>) -> Result<ExecOutcome, StorageError> {
        let res = self.db.execute(self.statement(sql, params)).await?;
        Ok(ExecOutcome {
            rows_affected: res.rows_affected(),
            last_insert_id: i64::try_from(res.last_insert_id()).ok().filter(|id| *id > 0),
        })
    }

    async fn query_one(&self, sql: &str, params: Vec<Param>) -> Result<Option<Box<dyn Row>>, StorageError> {
        let row = self.db.query_one(self.statement(sql, params)).await?;
        Ok(row.map(|r| Box::new(r) as Box<dyn Row>))
    }

    async fn query_many(&self, sql: &str, params: Vec<Param>) -> Result<Rows, StorageError> {
        let rows = self.db.query_all(self.statement(sql, params)).await?;
        Ok(Rows::new(rows.into_iter().map(|r| Box::new(r) as Box<dyn Row>)))
    }
}

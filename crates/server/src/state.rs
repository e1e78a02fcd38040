use std::sync::Arc;

use service::cars::{CarService, SqlCarRepository};
use service::storage::Storage;

pub type Cars = CarService<SqlCarRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub cars: Arc<Cars>,
}

impl ServerState {
    /// Wire repository and service on top of an injected storage handle.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let repo = Arc::new(SqlCarRepository::new(storage));
        Self { cars: Arc::new(CarService::new(repo)) }
    }
}

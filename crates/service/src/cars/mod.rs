//! Car inventory: repository over the storage port, validation rules, and the
//! application service used by the HTTP layer.

pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{CarRepository, RepositoryError, SqlCarRepository};
pub use service::CarService;

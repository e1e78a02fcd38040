//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access through the storage port.
//! - Reuses the record definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod storage;
pub mod cars;
#[cfg(test)]
pub mod test_support;

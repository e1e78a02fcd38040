pub mod routes;
pub mod startup;
pub mod state;
pub mod envelope;
pub mod errors;
pub mod openapi;

pub use startup::{run, serve};

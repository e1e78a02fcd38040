//! Record shapes shared by every layer plus the database connection helpers.

pub mod car;
pub mod db;

pub use car::Car;

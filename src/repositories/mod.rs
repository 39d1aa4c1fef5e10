//! Persistence gateways.
//!
//! Handlers only see the `ProductRepository` and `UserRepository` traits; the SQLite
//! implementations live next to them and are the only code that issues SQL.

pub mod product;
pub mod user;

pub use product::{ProductRepository, SqliteProductRepository};
pub use user::{SqliteUserRepository, UserRepository};

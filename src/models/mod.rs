pub mod product;
pub mod user;

pub use product::{Product, ProductInput, ProductQuery, SortDirection};
pub use user::{User, UserInput};

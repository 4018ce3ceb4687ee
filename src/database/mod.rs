pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryPropertyStore;
pub use models::property::{Property, PropertyFields, PropertyInput};
pub use postgres::PgPropertyStore;
pub use store::{PropertyStore, StoreError};

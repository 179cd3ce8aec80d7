pub mod coerce;
mod store;

pub use store::{PropertyStore, StoreError, COLUMNS};

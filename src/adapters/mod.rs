// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod query_store;

pub use http::{HttpDoctorRepository, DEFAULT_API_ENDPOINT};
pub use query_store::MemoryQueryStore;
